//! Human-readable rendering of nested mapping/sequence structures.
//!
//! Mappings print one `key:` line per entry with the value indented below it.
//! Scalars and sequence items are quoted:
//!
//! ```text
//! centos-7:
//!   template:
//!     "centos-7-x86_64"
//!   tags:
//!     "ci"
//!     "nightly"
//! ```

use serde_json::{Map, Value};

const INDENT: &str = "  ";

/// Render `value` as indented text. The result ends with a newline unless empty.
pub fn pretty_format(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => write_map(&mut out, map, 0),
        Value::Array(items) => write_items(&mut out, items, 0),
        scalar => write_line(&mut out, 0, &quoted(scalar)),
    }
    out
}

fn write_map(out: &mut String, map: &Map<String, Value>, indent: usize) {
    for (key, value) in map {
        write_line(out, indent, &format!("{key}:"));
        match value {
            Value::Object(nested) => write_map(out, nested, indent + 1),
            Value::Array(items) => write_items(out, items, indent + 1),
            scalar => write_line(out, indent + 1, &quoted(scalar)),
        }
    }
}

fn write_items(out: &mut String, items: &[Value], indent: usize) {
    for item in items {
        write_line(out, indent, &quoted(item));
    }
}

fn write_line(out: &mut String, indent: usize, text: &str) {
    out.push_str(&INDENT.repeat(indent));
    out.push_str(text);
    out.push('\n');
}

fn quoted(value: &Value) -> String {
    format!("\"{}\"", scalar_text(value))
}

/// Plain text of a scalar; strings are shown without JSON escaping.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
