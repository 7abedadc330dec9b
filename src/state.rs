use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::upstream::UpstreamClient;
use crate::store::RedirectMemory;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// Shared HTTP client, used by the health checks.
    pub http: reqwest::Client,
    /// Client for the upstream authentication service.
    pub auth: UpstreamClient,
    /// Pending post-login destination memory.
    pub redirects: RedirectMemory,
}

impl AppState {
    /// Creates a new `AppState` from the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| AppError::Internal(format!("Failed to build HTTP client: {err}")))?;
        tracing::info!("✅ Shared HTTP client initialized");

        let auth = UpstreamClient::new(
            http.clone(),
            &config.auth_service_url,
            Duration::from_millis(config.upstream_timeout_ms),
        );
        tracing::info!(
            "✅ Upstream auth client initialized for {}",
            config.auth_service_url
        );

        Ok(AppState {
            config: config.clone(),
            http,
            auth,
            redirects: RedirectMemory::default(),
        })
    }
}
