//! Registration side of the grammar.
//!
//! A [`CommandRegistry`] only accepts definitions. Once every command,
//! sub-command and argument has been declared it is sealed into a
//! [`Router`], which only parses. There is no way back, so a command line can
//! never be parsed against a half-built grammar.

use indexmap::IndexMap;
use tracing::trace;

use crate::bag::ArgumentBag;
use crate::error::{DispatchError, Kind, Result};
use crate::router::Router;
use crate::spec::ArgumentSpec;

/// Handler bound to a sub-command. Receives the parsed arguments and the
/// caller's shared context.
pub type Handler<C> = dyn Fn(&ArgumentBag, &mut C) -> anyhow::Result<()>;

/// A top-level command such as `vm`.
pub(crate) struct CommandDef<C> {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) subcommands: IndexMap<String, SubCommandDef<C>>,
}

/// A leaf of the grammar, bound to exactly one handler.
pub(crate) struct SubCommandDef<C> {
    pub(crate) command: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) arguments: Vec<ArgumentSpec>,
    pub(crate) handler: Box<Handler<C>>,
}

/// Collects the grammar before parsing begins.
pub struct CommandRegistry<C> {
    program: String,
    commands: IndexMap<String, CommandDef<C>>,
}

impl<C> CommandRegistry<C> {
    /// `program` is the name shown in usage lines.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            commands: IndexMap::new(),
        }
    }

    /// Create a top-level command.
    pub fn define_command(&mut self, name: &str, description: &str) -> Result<()> {
        if name.is_empty() {
            return Err(DispatchError::MissingField { field: "name" });
        }
        if self.commands.contains_key(name) {
            return Err(DispatchError::Duplicate {
                kind: Kind::Command,
                name: name.to_string(),
            });
        }

        trace!(command = name, "defining command");
        self.commands.insert(
            name.to_string(),
            CommandDef {
                name: name.to_string(),
                description: description.to_string(),
                subcommands: IndexMap::new(),
            },
        );
        Ok(())
    }

    /// Create a sub-command under an existing command and bind its handler.
    pub fn define_subcommand<H>(
        &mut self,
        command: &str,
        name: &str,
        description: &str,
        handler: H,
    ) -> Result<()>
    where
        H: Fn(&ArgumentBag, &mut C) -> anyhow::Result<()> + 'static,
    {
        let parent = self
            .commands
            .get_mut(command)
            .ok_or_else(|| DispatchError::UnknownParent {
                kind: Kind::Command,
                name: command.to_string(),
            })?;

        if name.is_empty() {
            return Err(DispatchError::MissingField { field: "name" });
        }
        if parent.subcommands.contains_key(name) {
            return Err(DispatchError::Duplicate {
                kind: Kind::SubCommand,
                name: format!("{command} {name}"),
            });
        }

        trace!(command, subcommand = name, "defining sub-command");
        parent.subcommands.insert(
            name.to_string(),
            SubCommandDef {
                command: command.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                arguments: Vec::new(),
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Append an argument to an existing sub-command. Positional arguments
    /// are matched in the order they are added here.
    pub fn define_argument(
        &mut self,
        command: &str,
        subcommand: &str,
        spec: ArgumentSpec,
    ) -> Result<()> {
        let parent = self
            .commands
            .get_mut(command)
            .ok_or_else(|| DispatchError::UnknownParent {
                kind: Kind::Command,
                name: command.to_string(),
            })?;
        let leaf = parent
            .subcommands
            .get_mut(subcommand)
            .ok_or_else(|| DispatchError::UnknownParent {
                kind: Kind::SubCommand,
                name: format!("{command} {subcommand}"),
            })?;

        if spec.name.is_empty() {
            return Err(DispatchError::MissingField { field: "name" });
        }
        if leaf.arguments.iter().any(|existing| existing.name == spec.name) {
            return Err(DispatchError::Duplicate {
                kind: Kind::Argument,
                name: spec.name,
            });
        }

        trace!(command, subcommand, argument = %spec.name, "defining argument");
        leaf.arguments.push(spec);
        Ok(())
    }

    pub fn contains(&self, command: &str, subcommand: &str) -> bool {
        self.commands
            .get(command)
            .is_some_and(|c| c.subcommands.contains_key(subcommand))
    }

    /// Freeze the grammar. Only the returned router can parse.
    pub fn seal(self) -> Router<C> {
        Router::new(self.program, self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &ArgumentBag, _: &mut ()) -> anyhow::Result<()> {
        Ok(())
    }

    fn registry() -> CommandRegistry<()> {
        let mut registry = CommandRegistry::new("test");
        registry.define_command("vm", "Manage VMs").unwrap();
        registry
    }

    #[test]
    fn test_duplicate_command_rejected() {
        let mut registry = registry();
        let err = registry.define_command("vm", "again").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Duplicate { kind: Kind::Command, ref name } if name == "vm"
        ));
    }

    #[test]
    fn test_duplicate_subcommand_rejected() {
        let mut registry = registry();
        registry.define_subcommand("vm", "list", "List", noop).unwrap();
        let err = registry
            .define_subcommand("vm", "list", "List", noop)
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Duplicate { kind: Kind::SubCommand, .. }
        ));
    }

    #[test]
    fn test_subcommand_requires_parent() {
        let mut registry = registry();
        let err = registry
            .define_subcommand("token", "create", "Create", noop)
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnknownParent { kind: Kind::Command, ref name } if name == "token"
        ));
    }

    #[test]
    fn test_argument_requires_subcommand() {
        let mut registry = registry();
        let err = registry
            .define_argument("vm", "get", ArgumentSpec::positional("platform"))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnknownParent { kind: Kind::SubCommand, ref name } if name == "vm get"
        ));

        let err = registry
            .define_argument("lifetime", "get", ArgumentSpec::positional("hostname"))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnknownParent { kind: Kind::Command, .. }
        ));
    }

    #[test]
    fn test_argument_requires_name() {
        let mut registry = registry();
        registry.define_subcommand("vm", "get", "Get", noop).unwrap();
        let err = registry
            .define_argument("vm", "get", ArgumentSpec::positional(""))
            .unwrap_err();
        assert!(matches!(err, DispatchError::MissingField { field: "name" }));
    }

    #[test]
    fn test_argument_names_unique_per_subcommand() {
        let mut registry = registry();
        registry.define_subcommand("vm", "get", "Get", noop).unwrap();
        registry
            .define_argument("vm", "get", ArgumentSpec::positional("platform"))
            .unwrap();
        let err = registry
            .define_argument("vm", "get", ArgumentSpec::positional("platform"))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Duplicate { kind: Kind::Argument, .. }
        ));
    }

    #[test]
    fn test_contains() {
        let mut registry = registry();
        registry.define_subcommand("vm", "running", "Running", noop).unwrap();
        assert!(registry.contains("vm", "running"));
        assert!(!registry.contains("vm", "stopped"));
        assert!(!registry.contains("token", "running"));
    }
}
