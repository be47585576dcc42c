//! vmpooler-messages
//!
//! Centralized messaging for the vmpooler CLI.
//! Provides the user-facing templates and a message builder that fills in
//! their `{variable}` placeholders.

pub mod builder;
pub mod macros;
pub mod messages;

pub use messages::MESSAGES;
