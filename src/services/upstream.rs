use http::StatusCode;
use sonic_rs::{JsonValueTrait, Value};
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::services::token::create_auth_headers;

/// A reply from the upstream auth service: status plus parsed JSON body.
#[derive(Debug)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

/// Client for the upstream authentication service.
///
/// Single-shot semantics: no retries, no backoff. A transport failure
/// surfaces immediately as 503 (connection) or 504 (timeout).
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Creates a client rooted at `base_url`.
    pub fn new(http: reqwest::Client, base_url: &str, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// POSTs a JSON body and returns the raw status and parsed body, leaving
    /// status-specific mapping to the caller.
    pub async fn post_json(&self, path: &str, body: &impl serde::Serialize) -> Result<UpstreamReply> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .timeout(self.timeout)
            .header(http::header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        Ok(read_reply(response).await)
    }

    /// GETs `path` with bearer auth, applying the shared fetch contract:
    /// 401 becomes the distinguished unauthorized error, 204 resolves with
    /// no body, other non-2xx rejects with the body `error` field (falling
    /// back to the HTTP status text), and 2xx resolves with the parsed body.
    pub async fn fetch_json(&self, path: &str, token: &str) -> Result<Option<Value>> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .timeout(self.timeout)
            .headers(create_auth_headers(token))
            .send()
            .await
            .map_err(map_transport_error)?;

        let reply = read_reply(response).await;

        if reply.status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Authentication(
                "Unauthorized - redirecting to login".to_string(),
            ));
        }
        if reply.status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !reply.status.is_success() {
            return Err(AppError::UpstreamUnavailable(error_message(&reply)));
        }

        Ok(reply.body)
    }
}

/// Pulls the error message out of an upstream reply, preferring the body's
/// `error` (then `detail`) field over the HTTP status text.
pub fn error_message(reply: &UpstreamReply) -> String {
    reply
        .body
        .as_ref()
        .and_then(|body| {
            body.get("error")
                .and_then(|value| value.as_str())
                .or_else(|| body.get("detail").and_then(|value| value.as_str()))
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            reply
                .status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        })
}

async fn read_reply(response: reqwest::Response) -> UpstreamReply {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();
    let body = if bytes.is_empty() {
        None
    } else {
        sonic_rs::from_slice(&bytes).ok()
    };

    UpstreamReply { status, body }
}

fn map_transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::UpstreamTimeout(format!("Upstream request timed out: {err}"))
    } else {
        AppError::UpstreamUnavailable(format!("Upstream request failed: {err}"))
    }
}
