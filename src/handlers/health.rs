use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::health::ServiceStatus;
use crate::services::health as health_service;
use crate::state::AppState;

/// Aggregated health endpoint.
///
/// Degraded still answers 200: the portal itself is up for liveness
/// purposes. Only an unhealthy aggregate maps to 503.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Response {
    let report = health_service::aggregate(&state).await;

    let status = if report.status == ServiceStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    tracing::debug!("Health check aggregated to {:?}", report.status);

    (status, Json(report)).into_response()
}
