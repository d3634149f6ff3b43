//! Flow selection from the first token

use super::flows::{FlowDefinition, FlowRegistry};
use super::session::SessionState;

/// Outcome of routing one request
#[derive(Debug)]
pub enum Route<'a> {
    /// No input yet, or a selector the registry does not know
    RootMenu,
    /// A known flow and the answers given to it so far
    Flow {
        flow: &'a FlowDefinition,
        state: SessionState,
    },
}

/// Pick the flow named by token 0 and hand it tokens 1..n.
///
/// Unknown selectors fall back to the root menu so the user can retry.
pub fn route<'a>(registry: &'a FlowRegistry, tokens: &[String]) -> Route<'a> {
    let Some((selector, answers)) = tokens.split_first() else {
        return Route::RootMenu;
    };

    match registry.get(selector) {
        Some(flow) => Route::Flow {
            flow,
            state: SessionState::new(flow.id, answers.to_vec()),
        },
        None => Route::RootMenu,
    }
}
