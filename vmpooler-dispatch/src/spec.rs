//! Argument declarations and the values they coerce to.

use std::fmt;

use crate::error::DispatchError;

/// A coerced argument value as exposed to handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Text(String),
    Integer(i64),
}

impl ArgValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Text(s) => Some(s),
            ArgValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ArgValue::Integer(i) => Some(*i),
            ArgValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Text(s) => f.write_str(s),
            ArgValue::Integer(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Integer(value)
    }
}

/// Coerces and range-checks one raw token. The error string is shown to the
/// user as-is, so it should state the violated constraint.
pub type Validator = fn(&str) -> Result<ArgValue, String>;

/// How many values an argument takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    ZeroOrOne,
}

/// Declaration of a single sub-command argument.
///
/// ```
/// use vmpooler_dispatch::{ArgumentSpec, Cardinality};
///
/// let spec = ArgumentSpec::positional("platform")
///     .optional()
///     .default_value("")
///     .help("Search string for templates");
/// assert_eq!(spec.cardinality, Cardinality::ZeroOrOne);
/// assert_eq!(spec.synopsis(), "[platform]");
/// ```
#[derive(Clone)]
pub struct ArgumentSpec {
    pub name: String,
    pub positional: bool,
    pub default: Option<ArgValue>,
    pub validator: Option<Validator>,
    pub cardinality: Cardinality,
    pub help: String,
}

impl ArgumentSpec {
    /// A required positional argument.
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: true,
            default: None,
            validator: None,
            cardinality: Cardinality::One,
            help: String::new(),
        }
    }

    /// An optional named argument, given as `--name value` or `--name=value`.
    pub fn option(name: impl Into<String>) -> Self {
        Self {
            positional: false,
            cardinality: Cardinality::ZeroOrOne,
            ..Self::positional(name)
        }
    }

    pub fn optional(mut self) -> Self {
        self.cardinality = Cardinality::ZeroOrOne;
        self
    }

    pub fn required(mut self) -> Self {
        self.cardinality = Cardinality::One;
        self
    }

    /// Value used when an optional argument is omitted.
    pub fn default_value(mut self, value: impl Into<ArgValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = text.into();
        self
    }

    pub fn is_required(&self) -> bool {
        self.cardinality == Cardinality::One
    }

    /// Short form used in usage lines, e.g. `<hostname>` or `[--limit <limit>]`.
    pub fn synopsis(&self) -> String {
        let core = if self.positional {
            self.name.clone()
        } else {
            format!("--{0} <{0}>", self.name)
        };
        match (self.is_required(), self.positional) {
            (true, true) => format!("<{core}>"),
            (true, false) => core,
            (false, _) => format!("[{core}]"),
        }
    }

    /// Run the validator, if any, over one raw token.
    pub(crate) fn coerce(&self, raw: &str) -> Result<ArgValue, DispatchError> {
        match self.validator {
            Some(validate) => validate(raw).map_err(|message| DispatchError::Validation {
                argument: self.name.clone(),
                message,
            }),
            None => Ok(ArgValue::Text(raw.to_string())),
        }
    }
}

impl fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("name", &self.name)
            .field("positional", &self.positional)
            .field("default", &self.default)
            .field("validator", &self.validator.is_some())
            .field("cardinality", &self.cardinality)
            .field("help", &self.help)
            .finish()
    }
}
