use anyhow::{anyhow, bail, Context, Result};
use vmpooler_core::validation::lifetime_in_bounds;
use vmpooler_core::MAX_LIFETIME;
use vmpooler_dispatch::ArgumentBag;
use vmpooler_messages::{msg, MESSAGES};

use crate::session::Session;

fn hours(args: &ArgumentBag) -> Result<u32> {
    u32::try_from(args.integer("hours")?).context("hours out of range")
}

pub fn get(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let hostname = args.text("hostname")?;
    let api = session.api()?;
    let info = api.vm_info(hostname, &session.auth_token()?)?;
    let lifetime = info
        .lifetime()
        .ok_or_else(|| anyhow!("The vmpooler did not report a lifetime for {hostname}"))?;
    session.say(msg!(MESSAGES.lifetime.current, hours = lifetime))
}

pub fn set(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let hostname = args.text("hostname")?;
    let hours = hours(args)?;
    let api = session.api()?;
    api.set_lifetime(hostname, hours, &session.auth_token()?)?;
    Ok(())
}

/// Push the expiry `hours` past the VM's current running time.
pub fn extend(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let hostname = args.text("hostname")?;
    let extension = hours(args)?;
    let api = session.api()?;
    let token = session.auth_token()?;

    let running = api
        .vm_info(hostname, &token)?
        .running_hours()
        .ok_or_else(|| anyhow!("The vmpooler did not report a running time for {hostname}"))?;
    let new_lifetime = running.round() as i64 + i64::from(extension);
    if !lifetime_in_bounds(new_lifetime) {
        bail!(msg!(
            MESSAGES.lifetime.extend_out_of_bounds,
            hours = new_lifetime.to_string(),
            max = MAX_LIFETIME.to_string()
        ));
    }

    // Bounds were checked above.
    api.set_lifetime(hostname, new_lifetime as u32, &token)?;
    session.say(msg!(MESSAGES.lifetime.extended, hours = extension.to_string()))
}
