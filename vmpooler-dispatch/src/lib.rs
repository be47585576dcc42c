//! # vmpooler-dispatch
//!
//! A small two-tier command grammar: `<command> <sub-command> [arguments]`.
//!
//! The grammar is declared on a [`CommandRegistry`], sealed into a
//! [`Router`], and the router turns a command line into a call of the
//! handler bound to the selected sub-command.
//!
//! ```
//! use vmpooler_dispatch::{ArgumentBag, ArgumentSpec, CommandRegistry, Dispatched};
//!
//! # fn main() -> Result<(), vmpooler_dispatch::DispatchError> {
//! let mut registry: CommandRegistry<Vec<String>> = CommandRegistry::new("vmpooler");
//! registry.define_command("vm", "Discover and reserve VM instances")?;
//! registry.define_subcommand("vm", "get", "Get a vm from the pool", |args, seen| {
//!     seen.push(args.text("platform")?.to_string());
//!     Ok(())
//! })?;
//! registry.define_argument("vm", "get", ArgumentSpec::positional("platform"))?;
//!
//! let router = registry.seal();
//! let mut seen = Vec::new();
//! assert_eq!(router.dispatch(&["vm", "get", "centos-6"], &mut seen)?, Dispatched::Completed);
//! assert_eq!(seen, vec!["centos-6".to_string()]);
//! # Ok(())
//! # }
//! ```

pub mod bag;
pub mod error;
pub mod registry;
pub mod router;
pub mod spec;

pub use bag::ArgumentBag;
pub use error::{DispatchError, Kind, Result};
pub use registry::{CommandRegistry, Handler};
pub use router::{Dispatched, Parsed, ParsedInvocation, Router};
pub use spec::{ArgValue, ArgumentSpec, Cardinality, Validator};
