//! Per-request dialogue values
//!
//! Nothing here outlives the request that produced it.

use super::tokenizer::tokenize;

/// Everything the gateway sent for one dialogue step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInput {
    /// Gateway correlation id, used for logging only
    pub session_id: String,
    #[allow(dead_code)] // Forwarded by no current flow
    pub phone_number: String,
    pub service_code: String,
    /// Accumulated answers, oldest first
    pub tokens: Vec<String>,
}

impl SessionInput {
    pub fn new(
        session_id: Option<String>,
        phone_number: Option<String>,
        service_code: Option<String>,
        text: Option<&str>,
    ) -> Self {
        Self {
            session_id: session_id.unwrap_or_default(),
            phone_number: phone_number.unwrap_or_default(),
            service_code: service_code.unwrap_or_default(),
            tokens: tokenize(text),
        }
    }
}

/// Where the user is: the selected flow and the answers given to it so far.
///
/// Rebuilt from [`SessionInput::tokens`] on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub flow_id: &'static str,
    pub answers: Vec<String>,
}

impl SessionState {
    pub fn new(flow_id: &'static str, answers: Vec<String>) -> Self {
        Self { flow_id, answers }
    }

    /// Number of answers collected after the selector
    pub fn step(&self) -> usize {
        self.answers.len()
    }
}
