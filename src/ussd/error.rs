//! Internal dialogue errors
//!
//! These never reach the wire as-is; the service maps them to an apology.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UssdError {
    #[error("Field was not collected by this flow: {0}")]
    MissingField(&'static str),
    #[error("Field is not numeric: {0}")]
    NotNumeric(&'static str),
}
