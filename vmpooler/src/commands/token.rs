use anyhow::Result;
use tracing::info;
use vmpooler_config::AUTH_TOKEN;
use vmpooler_dispatch::ArgumentBag;
use vmpooler_messages::{msg, MESSAGES};

use super::print_pretty;
use crate::session::Session;

/// Create a token from the user's credentials and make it the configured one.
pub fn create(_args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let (username, password) = session.credentials()?;
    let api = session.api()?;
    let token = api.create_token(&username, &password)?;

    session.config_mut().set(AUTH_TOKEN, token.as_str());
    session.save()?;
    session.say(msg!(MESSAGES.token.created, token = token.as_str()))
}

pub fn validate(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let token = args.text("token")?;
    let api = session.api()?;
    let info = api.token_info(token)?;
    print_pretty(session, &info.to_json())
}

pub fn revoke(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let token = args.text("token")?;
    let (username, password) = session.credentials()?;
    session.say("")?;
    let api = session.api()?;
    api.revoke_token(&username, &password, token)?;

    if session.config().get(AUTH_TOKEN) == Some(token) {
        session.config_mut().set(AUTH_TOKEN, "");
        session.save()?;
        info!("cleared the revoked token from the configuration");
    }
    session.say(msg!(MESSAGES.token.revoked, token = token))
}
