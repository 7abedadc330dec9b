use anyhow::{Context, Result};
use std::env;

/// Default base URL of the AI service health endpoint.
const DEFAULT_AI_SERVICE_URL: &str = "http://localhost:8000";
/// Default base URL of the Gibbon backend.
const DEFAULT_GIBBON_URL: &str = "http://localhost:8080/gibbon";

/// The application's configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The port the server listens on.
    pub port: u16,
    /// Base URL of the AI service.
    pub ai_service_url: String,
    /// Base URL of the Gibbon backend.
    pub gibbon_url: String,
    /// Base URL of the upstream authentication service.
    pub auth_service_url: String,
    /// Max-age of the access-token cookie, in seconds.
    pub access_token_max_age: i64,
    /// Max-age of the refresh-token cookie, in seconds.
    pub refresh_token_max_age: i64,
    /// Per-service health check budget, in milliseconds.
    pub health_check_timeout_ms: u64,
    /// Timeout for calls to the upstream auth service, in milliseconds.
    pub upstream_timeout_ms: u64,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// Every variable has a documented default so the server can boot
    /// against a local Gibbon/AI stack with an empty environment.
    pub fn from_env() -> Result<Self> {
        let gibbon_url = env::var("GIBBON_URL").unwrap_or_else(|_| DEFAULT_GIBBON_URL.to_string());

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid PORT")?,
            ai_service_url: env::var("AI_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_AI_SERVICE_URL.to_string()),
            auth_service_url: env::var("AUTH_SERVICE_URL").unwrap_or_else(|_| gibbon_url.clone()),
            gibbon_url,
            access_token_max_age: env::var("ACCESS_TOKEN_MAX_AGE_SECS")
                .unwrap_or_else(|_| "604800".to_string())
                .parse()
                .context("Invalid ACCESS_TOKEN_MAX_AGE_SECS")?,
            refresh_token_max_age: env::var("REFRESH_TOKEN_MAX_AGE_SECS")
                .unwrap_or_else(|_| "2592000".to_string())
                .parse()
                .context("Invalid REFRESH_TOKEN_MAX_AGE_SECS")?,
            health_check_timeout_ms: env::var("HEALTH_CHECK_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("Invalid HEALTH_CHECK_TIMEOUT_MS")?,
            upstream_timeout_ms: env::var("UPSTREAM_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .context("Invalid UPSTREAM_TIMEOUT_MS")?,
        })
    }
}
