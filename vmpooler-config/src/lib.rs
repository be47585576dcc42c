//! Local configuration for the vmpooler client.
//!
//! The configuration is a flat JSON object of strings stored in the user's
//! home directory. Values the client needs but does not have yet are asked
//! for interactively through a [`Prompter`] and persisted.

pub mod prompt;
pub mod store;

pub use prompt::{Prompter, TerminalPrompter};
pub use store::{ConfigStore, AUTH_TOKEN, USERNAME, VMPOOLER_URL};
