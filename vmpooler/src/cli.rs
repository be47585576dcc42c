// Global options, parsed before the command grammar sees the remaining tokens.

use clap::Parser;
use std::path::PathBuf;
use vmpooler_core::user_paths::CONFIG_ENV;

#[derive(Debug, Clone, Parser)]
#[command(name = "vmpooler")]
#[command(about = "Manage resources in the vmpooler from the command-line")]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(override_usage = "vmpooler [--config <PATH>] [--debug] <command> <sub-command> [arguments]")]
pub struct Args {
    /// Path to the configuration file
    #[arg(long, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Command, sub-command and arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_precede_tokens() {
        let args = Args::try_parse_from([
            "vmpooler",
            "--debug",
            "--config",
            "/tmp/pool.conf",
            "vm",
            "list",
            "cent",
        ])
        .unwrap();
        assert!(args.debug);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/pool.conf")));
        assert_eq!(args.tokens, vec!["vm", "list", "cent"]);
    }

    #[test]
    fn test_help_flags_reach_the_grammar() {
        let args = Args::try_parse_from(["vmpooler", "vm", "--help"]).unwrap();
        assert_eq!(args.tokens, vec!["vm", "--help"]);

        let args = Args::try_parse_from(["vmpooler", "--help"]).unwrap();
        assert_eq!(args.tokens, vec!["--help"]);
    }

    #[test]
    fn test_negative_values_are_tokens() {
        let args = Args::try_parse_from(["vmpooler", "lifetime", "set", "h1", "-5"]).unwrap();
        assert_eq!(args.tokens, vec!["lifetime", "set", "h1", "-5"]);
    }
}
