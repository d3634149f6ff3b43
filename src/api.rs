//! HTTP API for the USSD gateway

mod handlers;
mod types;

pub use handlers::create_router;

use crate::ussd::UssdService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ussd: Arc<UssdService>,
}

impl AppState {
    pub fn new(ussd: UssdService) -> Self {
        Self {
            ussd: Arc::new(ussd),
        }
    }
}
