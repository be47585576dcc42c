//! Per-user file locations for the vmpooler client.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// File name of the client configuration.
pub const CONFIG_NAME: &str = ".vmpooler.conf";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV: &str = "VMPOOLER_CONFIG";

/// Get the default configuration file path.
///
/// Returns:
/// - Linux/macOS: `~/.vmpooler.conf`
/// - Windows: `%APPDATA%\.vmpooler.conf`
#[must_use = "configuration path should be used"]
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_base_dir()?.join(CONFIG_NAME))
}

#[cfg(windows)]
fn config_base_dir() -> Result<PathBuf> {
    // `config_dir` is the roaming %APPDATA% folder.
    dirs::config_dir().context("Could not determine the %APPDATA% directory")
}

#[cfg(not(windows))]
fn config_base_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine the home directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_file_name() {
        if let Ok(path) = default_config_path() {
            assert_eq!(path.file_name().unwrap(), CONFIG_NAME);
        }
    }
}
