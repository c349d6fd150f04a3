use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw response from the validation endpoint, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCheckResult(Value);

impl RawCheckResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `reCode` classification code, if present and integral
    pub fn re_code(&self) -> Option<i64> {
        self.0.get("reCode").and_then(Value::as_i64)
    }

    /// The `data` message field, empty when absent
    pub fn data(&self) -> String {
        match self.0.get("data") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}
