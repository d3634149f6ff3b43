//! Request-level dialogue handling
//!
//! tokens -> route -> evaluate -> (prompt | terminal action) -> reply.
//! Holds no per-session state; every call starts from the tokens alone.

use super::actions;
use super::evaluator::{evaluate, rejection_message, Step};
use super::flows::FlowRegistry;
use super::reply::Reply;
use super::router::{route, Route};
use super::session::SessionInput;
use crate::backend::FarmBackend;
use std::sync::Arc;

/// Reply used whenever something unexpected goes wrong
pub const GENERIC_APOLOGY: &str = "An error occurred. Try again later.";

/// Stateless USSD dialogue engine
pub struct UssdService {
    registry: Arc<FlowRegistry>,
    backend: Arc<dyn FarmBackend>,
}

impl UssdService {
    pub fn new(registry: Arc<FlowRegistry>, backend: Arc<dyn FarmBackend>) -> Self {
        Self { registry, backend }
    }

    /// Produce the reply for one dialogue step. Always returns a reply.
    pub async fn handle(&self, input: &SessionInput) -> Reply {
        let (flow, state) = match route(&self.registry, &input.tokens) {
            Route::RootMenu => return Reply::cont(self.registry.root_menu()),
            Route::Flow { flow, state } => (flow, state),
        };

        match evaluate(flow, &state) {
            Step::Prompt(prompt) => Reply::cont(prompt),
            Step::Rejected(errors) => {
                tracing::info!(
                    session_id = %input.session_id,
                    flow = state.flow_id,
                    failed_fields = errors.len(),
                    "Final answers failed validation"
                );
                Reply::end(rejection_message(&errors))
            }
            Step::Ready(values) => {
                tracing::info!(
                    session_id = %input.session_id,
                    flow = state.flow_id,
                    fields = values.len(),
                    tokens_required = flow.required_token_count(),
                    action = ?flow.action,
                    "Running terminal action"
                );
                match actions::run(flow.action, &values, self.backend.as_ref()).await {
                    Ok(reply) => reply,
                    Err(e) => {
                        tracing::error!(
                            session_id = %input.session_id,
                            flow = state.flow_id,
                            error = %e,
                            "Terminal action failed unexpectedly"
                        );
                        Reply::end(GENERIC_APOLOGY)
                    }
                }
            }
        }
    }
}
