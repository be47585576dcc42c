use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolerError {
    Validation(String),
    Io(#[from] std::io::Error),
    Serialization(String),
    Prompt(String),
    Auth(String),
    Other(#[from] anyhow::Error),
}

impl Display for PoolerError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            // Shown to the user verbatim.
            PoolerError::Validation(s) => write!(f, "{}", s),
            PoolerError::Io(e) => write!(f, "I/O error: {}", e),
            PoolerError::Serialization(s) => write!(f, "Serialization error: {}", s),
            PoolerError::Prompt(s) => write!(f, "Prompt failed: {}", s),
            PoolerError::Auth(s) => write!(f, "{}", s),
            PoolerError::Other(e) => write!(f, "{}", e),
        }
    }
}

impl From<serde_json::Error> for PoolerError {
    fn from(err: serde_json::Error) -> Self {
        PoolerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PoolerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = PoolerError::Validation("hours out of range".to_string());
        assert_eq!(err.to_string(), "hours out of range");
    }

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err: PoolerError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, PoolerError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
