//! Central registry for all user-facing message templates.
//!
//! This module is organized by top-level command:
//! - `config` - configuration file and credential prompts
//! - `lifetime` - VM lifetime reporting
//! - `token` - auth token messages
//! - `vm` - VM listing, acquisition and destruction
//! - `common` - run outcome and shared messages
//!
//! ```rust
//! use vmpooler_messages::{msg, MESSAGES};
//!
//! let text = msg!(MESSAGES.vm.hostname, hostname = "abc123");
//! assert_eq!(text, "Hostname: abc123");
//! ```

mod common;
mod config;
mod lifetime;
mod token;
mod vm;

pub use common::{CommonMessages, COMMON_MESSAGES};
pub use config::{ConfigMessages, CONFIG_MESSAGES};
pub use lifetime::{LifetimeMessages, LIFETIME_MESSAGES};
pub use token::{TokenMessages, TOKEN_MESSAGES};
pub use vm::{VmMessages, VM_MESSAGES};

/// Unified messages struct containing all domain-specific message modules
pub struct Messages {
    pub common: CommonMessages,
    pub config: ConfigMessages,
    pub lifetime: LifetimeMessages,
    pub token: TokenMessages,
    pub vm: VmMessages,
}

/// Global messages constant - main entry point for all message templates
pub const MESSAGES: Messages = Messages {
    common: COMMON_MESSAGES,
    config: CONFIG_MESSAGES,
    lifetime: LIFETIME_MESSAGES,
    token: TOKEN_MESSAGES,
    vm: VM_MESSAGES,
};
