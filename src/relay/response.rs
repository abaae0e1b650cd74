//! Submission response envelope normalization
//!
//! The relay may return its fields at the top level or wrapped in a `data`
//! object. Both shapes reduce to one [`BatchReply`].

use serde::Serialize;
use serde_json::Value;

/// Canonical view of a submit-batch response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReply {
    pub success: bool,
    pub code: i64,
    pub message: String,
    pub signatures: Vec<String>,
}

impl BatchReply {
    /// Normalize a raw body. Never fails; missing or mistyped fields take
    /// their defaults (`false`, `0`, `""`, `[]`).
    pub fn from_body(body: &Value) -> Self {
        let success = lookup(body, "success", Value::as_bool).unwrap_or(false);
        let code = lookup(body, "code", as_code).unwrap_or(0);
        let message = lookup(body, "message", |v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        let signatures = lookup(body, "signatures", as_string_list).unwrap_or_default();

        Self {
            success,
            code,
            message,
            signatures,
        }
    }
}

/// Read `data.<key>` first, then `<key>`; a value of the wrong type counts
/// as absent.
fn lookup<T>(body: &Value, key: &str, extract: impl Fn(&Value) -> Option<T>) -> Option<T> {
    body.get("data")
        .and_then(|data| data.get(key))
        .and_then(&extract)
        .or_else(|| body.get(key).and_then(&extract))
}

fn as_code(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}

fn as_string_list(v: &Value) -> Option<Vec<String>> {
    v.as_array().map(|items| {
        items
            .iter()
            .filter_map(|s| s.as_str().map(str::to_string))
            .collect()
    })
}
