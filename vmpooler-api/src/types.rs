//! Service payloads.
//!
//! The service returns loosely structured objects whose fields differ across
//! versions, so the payloads stay JSON maps with typed accessors for the
//! fields the client relies on.

use serde::Deserialize;
use serde_json::{Map, Value};
use vmpooler_core::format::scalar_text;

/// Information about one VM, as returned by `GET /vm/{hostname}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct VmInfo(Map<String, Value>);

impl VmInfo {
    /// Hours the VM has been running. The service sends this as a number or
    /// as a numeric string.
    pub fn running_hours(&self) -> Option<f64> {
        number(self.0.get("running")?)
    }

    /// The display form of the `running` field, as sent by the service.
    pub fn running_text(&self) -> Option<String> {
        self.0.get("running").map(scalar_text)
    }

    pub fn lifetime(&self) -> Option<String> {
        self.0.get("lifetime").map(scalar_text)
    }

    pub fn template(&self) -> Option<String> {
        self.0.get("template").map(scalar_text)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Information about an auth token, as returned by `GET /token/{token}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TokenInfo(Map<String, Value>);

impl TokenInfo {
    /// Hostnames of the VMs currently checked out with this token.
    pub fn running_vms(&self) -> Vec<String> {
        self.0
            .get("vms")
            .and_then(|vms| vms.get("running"))
            .and_then(Value::as_array)
            .map(|hosts| hosts.iter().map(scalar_text).collect())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_running_hours_accepts_numbers_and_strings() {
        let info: VmInfo = serde_json::from_value(json!({"running": 2.6})).unwrap();
        assert_eq!(info.running_hours(), Some(2.6));
        let info: VmInfo = serde_json::from_value(json!({"running": "0.25"})).unwrap();
        assert_eq!(info.running_hours(), Some(0.25));
        assert_eq!(info.running_text().as_deref(), Some("0.25"));
        let info: VmInfo = serde_json::from_value(json!({"running": null})).unwrap();
        assert_eq!(info.running_hours(), None);
    }

    #[test]
    fn test_running_vms_defaults_to_empty() {
        let info: TokenInfo = serde_json::from_value(json!({"user": "jdoe"})).unwrap();
        assert!(info.running_vms().is_empty());

        let info: TokenInfo =
            serde_json::from_value(json!({"vms": {"running": ["a1", "b2"]}})).unwrap();
        assert_eq!(info.running_vms(), vec!["a1", "b2"]);
    }
}
