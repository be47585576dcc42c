//! The vmpooler command grammar.
//!
//! Every command, sub-command and argument the CLI accepts is declared here
//! and bound to its handler in [`crate::commands`].

use vmpooler_core::validate_lifetime;
use vmpooler_dispatch::{ArgValue, ArgumentSpec, CommandRegistry, DispatchError, Router};

use crate::commands::{config, lifetime, token, vm};
use crate::session::Session;

pub const PROGRAM: &str = "vmpooler";

type Registry = CommandRegistry<Session>;
type Result<T> = std::result::Result<T, DispatchError>;

const VM_LIST_HELP: &str = "List available templates on VM pooler.
Optionally provide a search string to filter the platforms by.
The search string is matched fuzzily. For example:
\"centos-6-x86\" will be matched by any of the following:
\"cos\", \"cent86\", \"tox\", \"centos86\", but not:
\"centosbob\", \"centos-6-x86bob\", \"bobcos\".";

/// Lifetime hours as an integer argument value.
fn lifetime_hours(raw: &str) -> std::result::Result<ArgValue, String> {
    validate_lifetime(raw)
        .map(|hours| ArgValue::Integer(i64::from(hours)))
        .map_err(|e| e.to_string())
}

/// Build the full grammar and seal it for parsing.
pub fn build_grammar() -> Result<Router<Session>> {
    let mut registry = Registry::new(PROGRAM);

    registry.define_command("config", "Read and modify the vmpooler configuration file")?;
    registry.define_command("lifetime", "Manage the lifetime of VM instances")?;
    registry.define_command("token", "Manage auth tokens")?;
    registry.define_command("vm", "Discover and reserve VM instances")?;

    configure_config_subcommands(&mut registry)?;
    configure_lifetime_subcommands(&mut registry)?;
    configure_token_subcommands(&mut registry)?;
    configure_vm_subcommands(&mut registry)?;

    Ok(registry.seal())
}

fn configure_config_subcommands(registry: &mut Registry) -> Result<()> {
    registry.define_subcommand("config", "set", "Set a config value", config::set)?;
    registry.define_argument(
        "config",
        "set",
        ArgumentSpec::positional("key").help("The config option to set"),
    )?;
    registry.define_argument(
        "config",
        "set",
        ArgumentSpec::positional("value").help("The value to set for the config option"),
    )?;

    registry.define_subcommand("config", "list", "List all the config settings", config::list)?;

    registry.define_subcommand("config", "get", "Read a config value", config::get)?;
    registry.define_argument(
        "config",
        "get",
        ArgumentSpec::positional("key").help("The config option to read"),
    )?;

    registry.define_subcommand(
        "config",
        "unset",
        "Remove a config option from the config",
        config::unset,
    )?;
    registry.define_argument(
        "config",
        "unset",
        ArgumentSpec::positional("key").help("The config option to unset"),
    )?;
    Ok(())
}

fn configure_lifetime_subcommands(registry: &mut Registry) -> Result<()> {
    registry.define_subcommand(
        "lifetime",
        "set",
        "Set the total lifetime (in hours) for a VM instance",
        lifetime::set,
    )?;
    registry.define_argument(
        "lifetime",
        "set",
        ArgumentSpec::positional("hostname")
            .help("The hostname of the VM to set the lifetime expiry"),
    )?;
    registry.define_argument(
        "lifetime",
        "set",
        ArgumentSpec::positional("hours")
            .validator(lifetime_hours)
            .help("The number of hours to set for the lifetime expiry"),
    )?;

    registry.define_subcommand(
        "lifetime",
        "get",
        "Get the lifetime (in hours) for a VM instance",
        lifetime::get,
    )?;
    registry.define_argument(
        "lifetime",
        "get",
        ArgumentSpec::positional("hostname").help("Retrieve the lifetime expiry for VM hostname"),
    )?;

    registry.define_subcommand(
        "lifetime",
        "extend",
        "Extend the lifetime (in hours) for a VM",
        lifetime::extend,
    )?;
    registry.define_argument(
        "lifetime",
        "extend",
        ArgumentSpec::positional("hostname").help("Extend the lifetime expiry for VM hostname"),
    )?;
    registry.define_argument(
        "lifetime",
        "extend",
        ArgumentSpec::positional("hours")
            .validator(lifetime_hours)
            .help("The number of hours to extend the lifetime expiry"),
    )?;
    Ok(())
}

fn configure_token_subcommands(registry: &mut Registry) -> Result<()> {
    registry.define_subcommand("token", "create", "Generate an authorization token", token::create)?;

    registry.define_subcommand(
        "token",
        "validate",
        "Validate an authorization token",
        token::validate,
    )?;
    registry.define_argument(
        "token",
        "validate",
        ArgumentSpec::positional("token").help("The token to validate"),
    )?;

    registry.define_subcommand("token", "revoke", "Revoke an authorization token", token::revoke)?;
    registry.define_argument(
        "token",
        "revoke",
        ArgumentSpec::positional("token").help("The token to revoke"),
    )?;
    Ok(())
}

fn configure_vm_subcommands(registry: &mut Registry) -> Result<()> {
    registry.define_subcommand("vm", "list", VM_LIST_HELP, vm::list)?;
    registry.define_argument(
        "vm",
        "list",
        ArgumentSpec::positional("platform")
            .optional()
            .default_value("")
            .help("Fuzzy search string for template names"),
    )?;

    registry.define_subcommand("vm", "get", "Get a vm from the pool", vm::get)?;
    registry.define_argument(
        "vm",
        "get",
        ArgumentSpec::positional("platform").help("The type of vm to acquire"),
    )?;

    registry.define_subcommand("vm", "info", "Display VM information", vm::info)?;
    registry.define_argument(
        "vm",
        "info",
        ArgumentSpec::positional("hostname").help("The hostname of the VM"),
    )?;

    registry.define_subcommand("vm", "destroy", "Destroy vm", vm::destroy)?;
    registry.define_argument(
        "vm",
        "destroy",
        ArgumentSpec::positional("hostname").help("VM hostname to destroy"),
    )?;

    registry.define_subcommand("vm", "running", "List running VMs", vm::running)?;
    registry.define_subcommand("vm", "destroy_all", "Destroy all running VMs", vm::destroy_all)?;
    Ok(())
}
