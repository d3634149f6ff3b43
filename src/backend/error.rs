//! Normalized backend failure

use serde_json::Value;
use thiserror::Error;

const FALLBACK_REASON: &str = "Server error";

/// The only failure shape a backend call can produce.
///
/// Callers see a human-readable reason and nothing about the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct BackendError {
    pub reason: String,
}

impl BackendError {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Self {
                reason: FALLBACK_REASON.to_string(),
            };
        }
        Self { reason }
    }

    /// Build a failure from a non-2xx response.
    ///
    /// Prefers the body's `message`, then `error`, then the status line.
    pub fn from_response(status: u16, body: &str) -> Self {
        match reason_from_body(body) {
            Some(reason) => Self::new(reason),
            None => Self::new(format!("Request failed with status code {status}")),
        }
    }

    /// Build a failure from a transport-level error (connect, timeout, decode).
    pub fn from_transport(err: &reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

fn reason_from_body(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| parsed.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Null | Value::String(_) => None,
            // e.g. {"error": {"code": 3}}
            other => Some(other.to_string()),
        })
}
