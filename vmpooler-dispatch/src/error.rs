//! Errors raised while building the grammar, parsing a command line, or
//! running the selected handler.

use std::fmt;
use thiserror::Error;

/// The kind of grammar entry an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Command,
    SubCommand,
    Argument,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Command => f.write_str("command"),
            Kind::SubCommand => f.write_str("sub-command"),
            Kind::Argument => f.write_str("argument"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DispatchError {
    /// A command, sub-command or argument was registered twice.
    #[error("The '{name}' {kind} has already been defined!")]
    Duplicate { kind: Kind, name: String },

    /// A sub-command or argument was attached to a parent that does not exist.
    #[error("The '{name}' {kind} has not been defined yet!")]
    UnknownParent { kind: Kind, name: String },

    /// An argument spec is missing a mandatory field.
    #[error("The argument field '{field}' must be specified!")]
    MissingField { field: &'static str },

    #[error("Unknown command '{name}'. Valid commands are: {}", .valid.join(", "))]
    UnknownCommand { name: String, valid: Vec<String> },

    #[error(
        "Unknown sub-command '{name}' for '{command}'. Valid sub-commands are: {}",
        .valid.join(", ")
    )]
    UnknownSubCommand {
        command: String,
        name: String,
        valid: Vec<String>,
    },

    /// An argument value was rejected by its validator.
    #[error("Invalid value for '{argument}': {message}")]
    Validation { argument: String, message: String },

    /// Wrong number or shape of tokens.
    #[error("{message}\n\n{usage}")]
    Usage { message: String, usage: String },

    /// The handler ran and reported a failure.
    #[error("{0:#}")]
    Operation(anyhow::Error),
}

impl DispatchError {
    /// True when the failure came from a running handler rather than from
    /// building the grammar or parsing the command line.
    pub fn is_operation(&self) -> bool {
        matches!(self, DispatchError::Operation(_))
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
