use std::cmp::Ordering;

use anyhow::Result;
use vmpooler_api::VmInfo;
use vmpooler_dispatch::ArgumentBag;
use vmpooler_messages::{msg, MESSAGES};

use super::print_pretty;
use crate::session::Session;

/// True when the characters of `pattern` occur in `candidate` in the same
/// order, not necessarily adjacent. `cos` matches `centos-6-x86`; `bobcos`
/// does not.
pub fn fuzzy_match(pattern: &str, candidate: &str) -> bool {
    let mut remaining = candidate.chars();
    pattern
        .chars()
        .all(|wanted| remaining.any(|c| c == wanted))
}

pub fn list(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let search = args.text("platform")?;
    let api = session.api()?;
    let templates = api.list_templates(&session.auth_token()?)?;

    let matching: Vec<&String> = templates
        .iter()
        .filter(|template| search.is_empty() || fuzzy_match(search, template))
        .collect();
    if matching.is_empty() {
        return session.say(msg!(MESSAGES.vm.no_templates_matching, search = search));
    }
    for template in matching {
        session.say(template)?;
    }
    Ok(())
}

pub fn get(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let platform = args.text("platform")?;
    let api = session.api()?;
    let hostname = api.acquire_vm(platform, &session.auth_token()?)?;
    session.say(msg!(MESSAGES.vm.hostname, hostname = hostname))
}

pub fn info(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let hostname = args.text("hostname")?;
    let api = session.api()?;
    let info = api.vm_info(hostname, &session.auth_token()?)?;
    print_pretty(session, &info.to_json())
}

pub fn destroy(args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let hostname = args.text("hostname")?;
    let api = session.api()?;
    api.destroy_vm(hostname, &session.auth_token()?)?;
    Ok(())
}

/// Running VMs of the configured token, longest running first.
pub fn running(_args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let api = session.api()?;
    let token = session.auth_token()?;
    let hostnames = api.token_info(&token)?.running_vms();
    if hostnames.is_empty() {
        return session.say(MESSAGES.vm.none_running);
    }

    let mut vms: Vec<(String, VmInfo)> = Vec::with_capacity(hostnames.len());
    for hostname in hostnames {
        let info = api.vm_info(&hostname, &token)?;
        vms.push((hostname, info));
    }
    vms.sort_by(|(_, a), (_, b)| {
        let a = a.running_hours().unwrap_or(0.0);
        let b = b.running_hours().unwrap_or(0.0);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });

    for (hostname, info) in vms {
        session.say(msg!(
            MESSAGES.vm.running_entry,
            hostname = hostname,
            running = info.running_text().unwrap_or_default(),
            template = info.template().unwrap_or_default()
        ))?;
    }
    Ok(())
}

/// Destroy every running VM of the configured token. Stops at the first
/// failure; VMs already destroyed stay destroyed.
pub fn destroy_all(_args: &ArgumentBag, session: &mut Session) -> Result<()> {
    let api = session.api()?;
    let token = session.auth_token()?;
    let hostnames = api.token_info(&token)?.running_vms();
    if hostnames.is_empty() {
        return session.say(MESSAGES.vm.nothing_to_destroy);
    }

    for hostname in hostnames {
        session.say(msg!(MESSAGES.vm.destroying, hostname = hostname.as_str()))?;
        api.destroy_vm(&hostname, &token)?;
    }
    Ok(())
}
