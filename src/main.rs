//! SmartFarm USSD gateway
//!
//! Serves the SmartFarm menu over the stateless USSD callback protocol and
//! bridges completed flows to the farm REST backend.

mod api;
mod backend;
mod config;
mod ussd;

use api::{create_router, AppState};
use backend::HttpBackend;
use config::ServerConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ussd::{FlowRegistry, UssdService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smartfarm_ussd=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = ServerConfig::from_env();
    tracing::info!(
        api_base = %config.api_base,
        timeout_secs = config.backend_timeout.as_secs(),
        "Backend configured"
    );

    let backend = HttpBackend::new(config.api_base.clone(), config.backend_timeout)?;
    let registry = Arc::new(FlowRegistry::builtin());
    tracing::info!(flows = registry.flows().len(), "Flow registry loaded");

    let ussd = UssdService::new(registry, Arc::new(backend));
    let state = AppState::new(ussd);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("SmartFarm USSD server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
