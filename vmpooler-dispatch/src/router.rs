//! Parsing side of the grammar.
//!
//! Tokens are matched in two tiers: token 0 selects the command, token 1 the
//! sub-command. Everything after that is consumed by the sub-command's
//! argument specs, positionals strictly in declaration order.

use indexmap::IndexMap;
use tracing::debug;

use crate::bag::ArgumentBag;
use crate::error::{DispatchError, Result};
use crate::registry::{CommandDef, SubCommandDef};

const HELP_FLAGS: [&str; 2] = ["-h", "--help"];
const END_OF_OPTIONS: &str = "--";

fn is_help(token: &str) -> bool {
    HELP_FLAGS.contains(&token)
}

/// Result of parsing a command line.
pub enum Parsed<'r, C> {
    Invocation(ParsedInvocation<'r, C>),
    Help(String),
}

/// What happened during [`Router::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The handler ran to completion.
    Completed,
    /// Help was requested; the text has not been printed.
    Help(String),
}

/// A fully resolved sub-command with its arguments, ready to run.
pub struct ParsedInvocation<'r, C> {
    subcommand: &'r SubCommandDef<C>,
    arguments: ArgumentBag,
}

impl<'r, C> ParsedInvocation<'r, C> {
    pub fn command(&self) -> &'r str {
        &self.subcommand.command
    }

    pub fn subcommand(&self) -> &'r str {
        &self.subcommand.name
    }

    pub fn arguments(&self) -> &ArgumentBag {
        &self.arguments
    }

    /// Run the bound handler. Its failures are reported as
    /// [`DispatchError::Operation`].
    pub fn invoke(self, context: &mut C) -> Result<()> {
        debug!(
            command = self.command(),
            subcommand = self.subcommand(),
            "invoking handler"
        );
        (self.subcommand.handler)(&self.arguments, context).map_err(DispatchError::Operation)
    }
}

impl<C> std::fmt::Debug for ParsedInvocation<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedInvocation")
            .field("command", &self.command())
            .field("subcommand", &self.subcommand())
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// A sealed grammar that turns command lines into invocations.
pub struct Router<C> {
    program: String,
    commands: IndexMap<String, CommandDef<C>>,
}

impl<C> Router<C> {
    pub(crate) fn new(program: String, commands: IndexMap<String, CommandDef<C>>) -> Self {
        Self { program, commands }
    }

    pub fn command_names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn subcommand_names(&self, command: &str) -> Option<Vec<String>> {
        self.commands
            .get(command)
            .map(|c| c.subcommands.keys().cloned().collect())
    }

    /// Parse `tokens` (the command line without the program name).
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Parsed<'_, C>> {
        let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();

        let Some(&command_name) = tokens.first() else {
            return Err(self.usage_error("No command given", self.usage()));
        };
        if is_help(command_name) {
            return Ok(Parsed::Help(self.usage()));
        }

        let command =
            self.commands
                .get(command_name)
                .ok_or_else(|| DispatchError::UnknownCommand {
                    name: command_name.to_string(),
                    valid: self.command_names(),
                })?;

        let Some(&subcommand_name) = tokens.get(1) else {
            return Err(self.usage_error(
                format!("Missing sub-command for '{command_name}'"),
                self.command_usage(command),
            ));
        };
        if is_help(subcommand_name) {
            return Ok(Parsed::Help(self.command_usage(command)));
        }

        let subcommand = command.subcommands.get(subcommand_name).ok_or_else(|| {
            DispatchError::UnknownSubCommand {
                command: command_name.to_string(),
                name: subcommand_name.to_string(),
                valid: command.subcommands.keys().cloned().collect(),
            }
        })?;

        let rest = &tokens[2..];
        if rest
            .iter()
            .take_while(|t| **t != END_OF_OPTIONS)
            .any(|t| is_help(t))
        {
            return Ok(Parsed::Help(self.subcommand_usage(subcommand)));
        }

        let arguments = self.bind_arguments(subcommand, rest)?;
        debug!(
            command = command_name,
            subcommand = subcommand_name,
            arguments = arguments.len(),
            "parsed command line"
        );

        Ok(Parsed::Invocation(ParsedInvocation {
            subcommand,
            arguments,
        }))
    }

    /// Parse `tokens` and run the selected handler with `context`.
    pub fn dispatch<S: AsRef<str>>(&self, tokens: &[S], context: &mut C) -> Result<Dispatched> {
        match self.parse(tokens)? {
            Parsed::Help(text) => Ok(Dispatched::Help(text)),
            Parsed::Invocation(invocation) => {
                invocation.invoke(context)?;
                Ok(Dispatched::Completed)
            }
        }
    }

    fn bind_arguments(&self, subcommand: &SubCommandDef<C>, rest: &[&str]) -> Result<ArgumentBag> {
        let mut positionals: Vec<&str> = Vec::new();
        let mut named: IndexMap<&str, &str> = IndexMap::new();
        let mut options_ended = false;
        let mut iter = rest.iter().copied();

        while let Some(token) = iter.next() {
            if !options_ended && token == END_OF_OPTIONS {
                options_ended = true;
                continue;
            }
            let option = token.strip_prefix("--").filter(|body| !body.is_empty());
            let Some(body) = option.filter(|_| !options_ended) else {
                positionals.push(token);
                continue;
            };

            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let spec = subcommand
                .arguments
                .iter()
                .find(|spec| !spec.positional && spec.name == name)
                .ok_or_else(|| {
                    self.usage_error(
                        format!("Unrecognized option '--{name}'"),
                        self.subcommand_usage(subcommand),
                    )
                })?;
            let value = match inline {
                Some(value) => value,
                None => iter.next().ok_or_else(|| {
                    self.usage_error(
                        format!("Option '--{name}' expects a value"),
                        self.subcommand_usage(subcommand),
                    )
                })?,
            };
            if named.insert(spec.name.as_str(), value).is_some() {
                return Err(self.usage_error(
                    format!("Option '--{name}' was given more than once"),
                    self.subcommand_usage(subcommand),
                ));
            }
        }

        let mut bag = ArgumentBag::new();
        let mut remaining = positionals.into_iter();

        for spec in &subcommand.arguments {
            let raw = if spec.positional {
                remaining.next()
            } else {
                named.get(spec.name.as_str()).copied()
            };

            match raw {
                Some(raw) => bag.insert(spec.name.clone(), spec.coerce(raw)?),
                None if spec.is_required() => {
                    let message = if spec.positional {
                        format!("Missing required argument '{}'", spec.name)
                    } else {
                        format!("Missing required option '--{}'", spec.name)
                    };
                    return Err(self.usage_error(message, self.subcommand_usage(subcommand)));
                }
                None => {
                    if let Some(default) = &spec.default {
                        bag.insert(spec.name.clone(), default.clone());
                    }
                }
            }
        }

        let leftover: Vec<&str> = remaining.collect();
        if !leftover.is_empty() {
            return Err(self.usage_error(
                format!("Unexpected argument(s): {}", leftover.join(" ")),
                self.subcommand_usage(subcommand),
            ));
        }

        Ok(bag)
    }

    fn usage_error(&self, message: impl Into<String>, usage: String) -> DispatchError {
        DispatchError::Usage {
            message: message.into(),
            usage,
        }
    }

    /// Top-level usage listing every command.
    pub fn usage(&self) -> String {
        let mut text = format!(
            "usage: {} <command> <sub-command> [arguments]\n\ncommands:\n",
            self.program
        );
        let rows: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name.as_str(), first_line(&c.description)))
            .collect();
        push_rows(&mut text, &rows);
        text
    }

    /// Usage for one command, listing its sub-commands.
    pub(crate) fn command_usage(&self, command: &CommandDef<C>) -> String {
        let mut text = format!(
            "usage: {} {} <sub-command> [arguments]\n\n{}\n\nsub-commands:\n",
            self.program, command.name, command.description
        );
        let rows: Vec<(&str, &str)> = command
            .subcommands
            .values()
            .map(|s| (s.name.as_str(), first_line(&s.description)))
            .collect();
        push_rows(&mut text, &rows);
        text
    }

    /// Usage for one sub-command, with its argument synopsis and help.
    pub(crate) fn subcommand_usage(&self, subcommand: &SubCommandDef<C>) -> String {
        let mut synopsis = format!("{} {} {}", self.program, subcommand.command, subcommand.name);
        for spec in &subcommand.arguments {
            synopsis.push(' ');
            synopsis.push_str(&spec.synopsis());
        }

        let mut text = format!("usage: {synopsis}\n\n{}\n", subcommand.description.trim_end());
        if !subcommand.arguments.is_empty() {
            text.push_str("\narguments:\n");
            let helps: Vec<String> = subcommand
                .arguments
                .iter()
                .map(|spec| match &spec.default {
                    Some(default) if !spec.is_required() => {
                        format!("{} (default: \"{default}\")", spec.help).trim().to_string()
                    }
                    _ => spec.help.clone(),
                })
                .collect();
            let rows: Vec<(&str, &str)> = subcommand
                .arguments
                .iter()
                .zip(&helps)
                .map(|(spec, help)| (spec.name.as_str(), help.as_str()))
                .collect();
            push_rows(&mut text, &rows);
        }
        text
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

fn push_rows(text: &mut String, rows: &[(&str, &str)]) {
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, help) in rows {
        if help.is_empty() {
            text.push_str(&format!("  {name}\n"));
        } else {
            text.push_str(&format!("  {name:<width$}  {help}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CommandRegistry;
    use crate::spec::{ArgValue, ArgumentSpec};

    #[derive(Default)]
    struct Calls {
        seen: Vec<(String, ArgumentBag)>,
    }

    fn record(tag: &'static str) -> impl Fn(&ArgumentBag, &mut Calls) -> anyhow::Result<()> {
        move |args: &ArgumentBag, calls: &mut Calls| {
            calls.seen.push((tag.to_string(), args.clone()));
            Ok(())
        }
    }

    fn router() -> Router<Calls> {
        let mut registry = CommandRegistry::new("pool");
        registry.define_command("vm", "Discover VMs").unwrap();
        registry
            .define_subcommand("vm", "list", "List templates\nwith detail", record("vm list"))
            .unwrap();
        registry
            .define_argument(
                "vm",
                "list",
                ArgumentSpec::positional("platform")
                    .optional()
                    .default_value("")
                    .help("Search string"),
            )
            .unwrap();
        registry
            .define_argument("vm", "list", ArgumentSpec::option("limit").help("Max rows"))
            .unwrap();
        registry
            .define_subcommand("vm", "running", "Running VMs", record("vm running"))
            .unwrap();
        registry
            .define_subcommand("vm", "fail", "Always fails", |_: &ArgumentBag, _: &mut Calls| {
                anyhow::bail!("pool drained")
            })
            .unwrap();
        registry.seal()
    }

    #[test]
    fn test_zero_argument_subcommand() {
        let router = router();
        let mut calls = Calls::default();
        assert_eq!(
            router.dispatch(&["vm", "running"], &mut calls).unwrap(),
            Dispatched::Completed
        );
        assert_eq!(calls.seen.len(), 1);
        assert_eq!(calls.seen[0].0, "vm running");
        assert!(calls.seen[0].1.is_empty());
    }

    #[test]
    fn test_zero_argument_subcommand_rejects_extra_tokens() {
        let router = router();
        let err = router.dispatch(&["vm", "running", "x"], &mut Calls::default());
        assert!(matches!(err, Err(DispatchError::Usage { .. })));
    }

    #[test]
    fn test_named_option_forms() {
        let router = router();
        let mut calls = Calls::default();
        router
            .dispatch(&["vm", "list", "--limit", "5", "cent"], &mut calls)
            .unwrap();
        router.dispatch(&["vm", "list", "--limit=7"], &mut calls).unwrap();

        let first = &calls.seen[0].1;
        assert_eq!(first.text("platform").unwrap(), "cent");
        assert_eq!(first.text("limit").unwrap(), "5");
        let second = &calls.seen[1].1;
        assert_eq!(second.text("platform").unwrap(), "");
        assert_eq!(second.text("limit").unwrap(), "7");
    }

    #[test]
    fn test_omitted_option_without_default_is_absent() {
        let router = router();
        let Parsed::Invocation(invocation) = router.parse(&["vm", "list"]).unwrap() else {
            panic!("expected invocation");
        };
        assert!(!invocation.arguments().contains("limit"));
        assert_eq!(
            invocation.arguments().get("platform"),
            Some(&ArgValue::Text(String::new()))
        );
    }

    #[test]
    fn test_unknown_option_and_missing_value() {
        let router = router();
        let err = router.parse(&["vm", "list", "--color", "red"]).err().unwrap();
        assert!(err.to_string().starts_with("Unrecognized option '--color'"));
        let err = router.parse(&["vm", "list", "--limit"]).err().unwrap();
        assert!(err.to_string().starts_with("Option '--limit' expects a value"));
        let err = router
            .parse(&["vm", "list", "--limit", "1", "--limit", "2"])
            .err()
            .unwrap();
        assert!(matches!(err, DispatchError::Usage { .. }));
    }

    #[test]
    fn test_end_of_options_marker() {
        let router = router();
        let Parsed::Invocation(invocation) = router.parse(&["vm", "list", "--", "--help"]).unwrap()
        else {
            panic!("expected invocation");
        };
        assert_eq!(invocation.arguments().text("platform").unwrap(), "--help");
    }

    #[test]
    fn test_help_at_each_level() {
        let router = router();
        let Parsed::Help(text) = router.parse(&["--help"]).unwrap() else {
            panic!("expected help");
        };
        assert!(text.contains("usage: pool <command>"));
        assert!(text.contains("vm  Discover VMs"));

        let Parsed::Help(text) = router.parse(&["vm", "-h"]).unwrap() else {
            panic!("expected help");
        };
        assert!(text.contains("list     List templates"));
        assert!(!text.contains("with detail"));

        let Parsed::Help(text) = router.parse(&["vm", "list", "--help"]).unwrap() else {
            panic!("expected help");
        };
        assert!(text.contains("usage: pool vm list [platform] [--limit <limit>]"));
        assert!(text.contains("Search string (default: \"\")"));
    }

    #[test]
    fn test_missing_tokens_are_usage_errors() {
        let router = router();
        let empty: [&str; 0] = [];
        let err = router.parse(&empty).err().unwrap();
        assert!(matches!(err, DispatchError::Usage { .. }));

        let err = router.parse(&["vm"]).err().unwrap();
        match err {
            DispatchError::Usage { message, usage } => {
                assert_eq!(message, "Missing sub-command for 'vm'");
                assert!(usage.contains("running"));
            }
            other => panic!("expected usage error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_subcommand_lists_valid_ones() {
        let router = router();
        let err = router.parse(&["vm", "lst"]).err().unwrap();
        match err {
            DispatchError::UnknownSubCommand {
                command,
                name,
                valid,
            } => {
                assert_eq!(command, "vm");
                assert_eq!(name, "lst");
                assert_eq!(valid, vec!["list", "running", "fail"]);
            }
            other => panic!("expected unknown sub-command, got {other:?}"),
        }
    }

    #[test]
    fn test_commands_are_case_sensitive() {
        let router = router();
        let err = router.parse(&["VM", "list"]).err().unwrap();
        assert!(matches!(err, DispatchError::UnknownCommand { .. }));
    }

    #[test]
    fn test_handler_failure_is_operation_error() {
        let router = router();
        let err = router
            .dispatch(&["vm", "fail"], &mut Calls::default())
            .unwrap_err();
        assert!(err.is_operation());
        assert_eq!(err.to_string(), "pool drained");
    }
}
