//! USSD dialogue engine
//!
//! The gateway resends the whole answer history on every step, so the
//! engine is stateless: each request is tokenized, routed to a flow by its
//! first token, and the next prompt or terminal action is chosen by
//! counting answers.

mod actions;
mod error;
mod evaluator;
mod flows;
mod reply;
mod router;
mod service;
mod session;
mod tokenizer;

#[cfg(test)]
mod proptests;

pub use flows::FlowRegistry;
pub use reply::Reply;
pub use service::{UssdService, GENERIC_APOLOGY};
pub use session::SessionInput;
