// Command handlers, one module per top-level command.
//
// Every handler has the same shape, `fn(&ArgumentBag, &mut Session)`, so it
// can be bound directly in the grammar.

use anyhow::Result;
use serde_json::Value;
use vmpooler_core::format::pretty_format;

use crate::session::Session;

pub mod config;
pub mod lifetime;
pub mod token;
pub mod vm;

/// Print a nested structure in the indented `key:` / `"value"` layout.
fn print_pretty(session: &mut Session, value: &Value) -> Result<()> {
    session.write_raw(&pretty_format(value))
}
