// Standard library
use std::process::ExitCode;

// External crates
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info_span, warn};
use uuid::Uuid;

// Internal imports
use vmpooler_config::ConfigStore;
use vmpooler_core::user_paths::default_config_path;
use vmpooler_core::{pooler_error, pooler_println, pooler_success, pooler_warning};
use vmpooler_dispatch::{DispatchError, Parsed};
use vmpooler_logging::{init_subscriber, LogSettings};
use vmpooler_messages::{msg, MESSAGES};

// Local modules
mod cli;
mod commands;
mod grammar;
mod session;

use cli::Args;
use grammar::build_grammar;
use session::Session;

/// How a run ended, when it did not fail.
enum Outcome {
    Completed,
    Help(String),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = LogSettings::from_env().with_debug(args.debug);
    // Held until exit so buffered file logs are flushed.
    let _log_guard = match init_subscriber(&settings) {
        Ok(guard) => guard,
        Err(e) => {
            pooler_warning!("{}", msg!(MESSAGES.common.logging_init_failed, error = e.to_string()));
            None
        }
    };

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        command = %args.tokens.join(" ")
    );
    let _entered = span.enter();

    match run(&args) {
        Ok(Outcome::Help(text)) => {
            pooler_println!("{}", text.trim_end());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Completed) => {
            pooler_success!("{}", MESSAGES.common.success.green());
            ExitCode::SUCCESS
        }
        Err(e) => {
            pooler_error!("{e:#}");
            pooler_error!("{}", MESSAGES.common.failed.red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let router = build_grammar().context("Failed to build the command grammar")?;

    let path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = ConfigStore::load(&path)
        .with_context(|| format!("Failed to load the configuration file {}", path.display()))?;
    if config.was_replaced() {
        pooler_warning!(
            "{}",
            msg!(
                MESSAGES.common.config_invalid_replaced,
                path = path.display().to_string()
            )
        );
    }
    let mut session = Session::terminal(config);

    let invocation = match router.parse(args.tokens.as_slice())? {
        Parsed::Help(text) => return Ok(Outcome::Help(text)),
        Parsed::Invocation(invocation) => invocation,
    };

    let outcome = invocation.invoke(&mut session);
    session.flush()?;
    // The session is saved whether or not the handler succeeded.
    let saved = session.save();

    match (outcome, saved) {
        (Ok(()), Ok(())) => Ok(Outcome::Completed),
        (Ok(()), Err(e)) => Err(e.context(msg!(
            MESSAGES.common.config_save_failed,
            path = path.display().to_string()
        ))),
        (Err(e), saved) => {
            if let Err(save_error) = saved {
                warn!(error = %save_error, "could not save configuration after failure");
            }
            debug!(operation = e.is_operation(), "command failed");
            Err(into_report(e))
        }
    }
}

fn into_report(error: DispatchError) -> anyhow::Error {
    match error {
        DispatchError::Operation(inner) => inner,
        other => other.into(),
    }
}
