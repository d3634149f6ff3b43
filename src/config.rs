//! Server configuration read from the environment

use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for the USSD server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Base URL of the farm REST backend, without a trailing slash
    pub api_base: String,
    /// Timeout applied to every backend call by the HTTP transport
    pub backend_timeout: Duration,
}

impl ServerConfig {
    /// Build the configuration from process environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }

        Self::from_vars(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("API_BASE").ok().as_deref(),
            std::env::var("BACKEND_TIMEOUT_SECS").ok().as_deref(),
        )
    }

    fn from_vars(port: Option<&str>, api_base: Option<&str>, timeout: Option<&str>) -> Self {
        let port = port.and_then(|p| p.trim().parse().ok()).unwrap_or(DEFAULT_PORT);

        let api_base = match api_base.map(str::trim).filter(|b| !b.is_empty()) {
            Some(base) => base.strip_suffix('/').unwrap_or(base).to_string(),
            None => format!("http://localhost:{port}"),
        };

        let backend_timeout = Duration::from_secs(
            timeout
                .and_then(|t| t.trim().parse().ok())
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
        );

        Self {
            port,
            api_base,
            backend_timeout,
        }
    }
}
