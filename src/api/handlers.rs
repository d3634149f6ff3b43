//! HTTP request handlers

use super::types::UssdParams;
use super::AppState;
use crate::ussd::{Reply, SessionInput, UssdService, GENERIC_APOLOGY};
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::{any, get},
    Form, Router,
};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::Instrument;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Gateway callback on any method: query string on GET, form body otherwise
        .route("/ussd", any(handle_ussd))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// USSD Gateway
// ============================================================

async fn handle_ussd(
    State(state): State<AppState>,
    method: Method,
    params: Result<Form<UssdParams>, FormRejection>,
) -> Response {
    let params = match params {
        Ok(Form(params)) => params,
        Err(rejection) => {
            // Treat as a fresh dialogue rather than failing the gateway call
            tracing::warn!(%method, error = %rejection, "Unreadable USSD payload");
            UssdParams::default()
        }
    };

    let input = SessionInput::new(
        params.session_id,
        params.phone_number,
        params.service_code,
        params.text.as_deref(),
    );

    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "ussd.request",
        request_id = %request_id,
        session_id = %input.session_id,
    );

    let reply = async {
        tracing::info!(
            %method,
            service_code = %input.service_code,
            tokens = input.tokens.len(),
            "USSD hit"
        );
        let reply = answer(&state.ussd, &input).await;
        tracing::debug!(end = reply.is_end(), "USSD reply");
        reply
    }
    .instrument(span)
    .await;

    ussd_response(&reply)
}

/// Run the dialogue engine, turning a panic into the generic apology.
async fn answer(service: &UssdService, input: &SessionInput) -> Reply {
    match AssertUnwindSafe(service.handle(input)).catch_unwind().await {
        Ok(reply) => reply,
        Err(panic) => {
            tracing::error!(panic = %panic_message(panic.as_ref()), "USSD handler panicked");
            Reply::end(GENERIC_APOLOGY)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

fn ussd_response(reply: &Reply) -> Response {
    ([(header::CONTENT_TYPE, "text/plain")], reply.encode()).into_response()
}

// ============================================================
// Service info
// ============================================================

async fn health() -> &'static str {
    "ok"
}

async fn get_version() -> &'static str {
    concat!("smartfarm-ussd ", env!("CARGO_PKG_VERSION"))
}
