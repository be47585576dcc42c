//! Interactive prompts.

use dialoguer::{Input, Password};
use vmpooler_core::{PoolerError, Result};

/// Source of interactively supplied values.
pub trait Prompter {
    /// Ask for a visible line of text.
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Ask for a secret without echoing it.
    fn password(&mut self, prompt: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| PoolerError::Prompt(format!("Failed to read \"{prompt}\": {e}")))
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| PoolerError::Prompt(format!("Failed to read \"{prompt}\": {e}")))
    }
}
