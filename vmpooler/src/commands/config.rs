use anyhow::{bail, Result};
use tracing::info;
use vmpooler_core::format::scalar_text;
use vmpooler_dispatch::ArgumentBag;
use vmpooler_messages::{msg, MESSAGES};

use super::print_pretty;
use crate::session::Session;

pub fn set(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let key = args.text("key")?;
    let value = args.text("value")?;

    session.config_mut().set(key, value);
    session.save()?;
    info!(key, "configuration value set");
    session.say(msg!(MESSAGES.config.set_value, key = key, value = value))
}

pub fn get(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let key = args.text("key")?;
    match session.config().value(key).map(scalar_text) {
        Some(value) => session.say(value),
        None => bail!(msg!(MESSAGES.config.not_set, key = key)),
    }
}

pub fn list(_args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let config = session.config().to_json();
    print_pretty(session, &config)
}

/// Unknown keys are reported but are not an error.
pub fn unset(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let key = args.text("key")?;
    if session.config_mut().unset(key).is_none() {
        return session.say(msg!(MESSAGES.config.unset_missing, key = key));
    }
    session.save()?;
    info!(key, "configuration value removed");
    Ok(())
}
