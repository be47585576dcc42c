use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};
use vmpooler_core::{PoolerError, Result};
use vmpooler_messages::{msg, MESSAGES};

use crate::prompt::Prompter;

pub const AUTH_TOKEN: &str = "auth_token";
pub const USERNAME: &str = "username";
pub const VMPOOLER_URL: &str = "vmpooler_url";

/// The configuration file contents plus the path it was loaded from.
///
/// Keys keep the order they have in the file. Values are kept as the JSON
/// they were read as, so keys this client does not know about are written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
    values: IndexMap<String, Value>,
    replaced: bool,
}

impl ConfigStore {
    fn default_values() -> IndexMap<String, Value> {
        let mut values = IndexMap::new();
        values.insert(AUTH_TOKEN.to_string(), Value::String(String::new()));
        values
    }

    /// Load the configuration at `path`.
    ///
    /// A missing file is created with the default contents. A file that is
    /// not a JSON object is overwritten with the default contents; the
    /// returned store then reports [`ConfigStore::was_replaced`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            info!(path = %path.display(), "creating default configuration file");
            let store = Self {
                path,
                values: Self::default_values(),
                replaced: false,
            };
            store.save()?;
            return Ok(store);
        }

        let contents = fs::read_to_string(&path)?;
        match parse_values(&contents) {
            Some(values) => {
                debug!(path = %path.display(), keys = values.len(), "loaded configuration");
                Ok(Self {
                    path,
                    values,
                    replaced: false,
                })
            }
            None => {
                warn!(path = %path.display(), "configuration file is invalid, writing defaults");
                let store = Self {
                    path,
                    values: Self::default_values(),
                    replaced: true,
                };
                store.save()?;
                Ok(store)
            }
        }
    }

    /// Write the configuration back to its file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&self.values)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the file on disk was invalid and has been reset.
    pub fn was_replaced(&self) -> bool {
        self.replaced
    }

    /// The value of `key` when it is a string. Keys holding any other JSON
    /// are treated as unset by the client.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// The raw JSON stored under `key`.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Value::String(value.into()));
    }

    /// Remove `key`, returning its previous value.
    pub fn unset(&mut self, key: &str) -> Option<Value> {
        self.values.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The whole configuration as a JSON object in file order, for display.
    pub fn to_json(&self) -> Value {
        Value::Object(self.values.clone().into_iter().collect())
    }

    /// Return the value of `key`, asking for it once and persisting the
    /// answer when it is not configured yet.
    pub fn request_value(
        &mut self,
        prompter: &mut dyn Prompter,
        key: &str,
        prompt: &str,
    ) -> Result<String> {
        if let Some(value) = self.get(key) {
            return Ok(value.to_string());
        }
        let value = prompter.input(prompt)?;
        self.set(key, value.clone());
        self.save()?;
        info!(key, "stored prompted configuration value");
        Ok(value)
    }

    /// The service URL, prompted for on first use.
    pub fn vmpooler_url(&mut self, prompter: &mut dyn Prompter) -> Result<String> {
        self.request_value(prompter, VMPOOLER_URL, MESSAGES.config.url_prompt)
    }

    /// The configured auth token. Missing, empty and non-string tokens are
    /// all errors.
    pub fn auth_token(&self) -> Result<&str> {
        match self.get(AUTH_TOKEN) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(PoolerError::Auth(msg!(MESSAGES.config.no_auth_token))),
        }
    }
}

fn parse_values(contents: &str) -> Option<IndexMap<String, Value>> {
    serde_json::from_str(contents).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values_accepts_objects_only() {
        assert!(parse_values("[1, 2]").is_none());
        assert!(parse_values("not json").is_none());
        assert!(parse_values("null").is_none());
        let values = parse_values(r#"{"z": "x", "n": 3}"#).unwrap();
        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["z", "n"]);
        assert_eq!(values.get("n"), Some(&Value::from(3)));
    }

    #[test]
    fn test_auth_token_rejects_empty() {
        let mut store = ConfigStore {
            path: PathBuf::from("unused"),
            values: ConfigStore::default_values(),
            replaced: false,
        };
        let err = store.auth_token().unwrap_err();
        assert!(err.to_string().contains("No authentication token found!"));

        store.set(AUTH_TOKEN, "abc");
        assert_eq!(store.auth_token().unwrap(), "abc");

        store.unset(AUTH_TOKEN);
        assert!(store.auth_token().is_err());
    }

    #[test]
    fn test_auth_token_rejects_non_string() {
        let mut values = ConfigStore::default_values();
        values.insert(AUTH_TOKEN.to_string(), Value::Null);
        let store = ConfigStore {
            path: PathBuf::from("unused"),
            values,
            replaced: false,
        };
        assert_eq!(store.get(AUTH_TOKEN), None);
        assert!(matches!(store.auth_token(), Err(PoolerError::Auth(_))));
    }
}
