mod common;

use axum::routing::get as get_route;
use axum::{Json, Router, http::StatusCode, response::IntoResponse};
use common::*;
use serde_json::json;

fn healthy_upstream(payload: serde_json::Value) -> Router {
    Router::new().route("/", get_route(move || async move { Json(payload).into_response() }))
}

fn failing_upstream(status: StatusCode) -> Router {
    Router::new().route("/", get_route(move || async move { status.into_response() }))
}

fn hanging_upstream() -> Router {
    Router::new().route(
        "/",
        get_route(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            StatusCode::OK.into_response()
        }),
    )
}

#[tokio::test]
async fn test_both_healthy_reports_healthy() {
    let ai_url = spawn_upstream(healthy_upstream(json!({"status": "ok", "model": "ready"}))).await;
    let gibbon_url = spawn_upstream(healthy_upstream(json!({"status": "ok"}))).await;
    let app = portal(test_config(&unreachable_url(), &ai_url, &gibbon_url));

    let (status, _, body) = send(&app, get_request("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "parent-portal");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let ai = &body["checks"]["aiService"];
    assert_eq!(ai["status"], "healthy");
    assert_eq!(ai["connected"], true);
    assert_eq!(ai["apiUrl"], ai_url);
    assert_eq!(ai["details"]["model"], "ready");
    assert!(ai["responseTime"].is_u64());

    let gibbon = &body["checks"]["gibbon"];
    assert_eq!(gibbon["status"], "healthy");
    assert_eq!(gibbon["gibbonUrl"], gibbon_url);
}

#[tokio::test]
async fn test_timestamp_is_rfc3339_with_millis() {
    let ai_url = spawn_upstream(healthy_upstream(json!({"status": "ok"}))).await;
    let gibbon_url = spawn_upstream(healthy_upstream(json!({"status": "ok"}))).await;
    let app = portal(test_config(&unreachable_url(), &ai_url, &gibbon_url));

    let (_, _, body) = send(&app, get_request("/api/health")).await;

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    // millisecond precision: 2026-01-01T00:00:00.000Z
    let fraction = timestamp.split('.').nth(1).unwrap();
    assert_eq!(fraction.len(), "000Z".len());
}

#[tokio::test]
async fn test_one_degraded_service_reports_degraded_but_200() {
    let ai_url = spawn_upstream(failing_upstream(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let gibbon_url = spawn_upstream(healthy_upstream(json!({"status": "ok"}))).await;
    let app = portal(test_config(&unreachable_url(), &ai_url, &gibbon_url));

    let (status, _, body) = send(&app, get_request("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");

    let ai = &body["checks"]["aiService"];
    assert_eq!(ai["status"], "degraded");
    assert_eq!(ai["connected"], false);
    assert!(ai["error"].as_str().unwrap().contains("500"));

    assert_eq!(body["checks"]["gibbon"]["status"], "healthy");
}

#[tokio::test]
async fn test_upstream_self_reported_failure_does_not_downgrade() {
    // transport-level success decides; the body is only recorded
    let ai_url = spawn_upstream(healthy_upstream(json!({"status": "unhealthy"}))).await;
    let gibbon_url = spawn_upstream(healthy_upstream(json!({"status": "ok"}))).await;
    let app = portal(test_config(&unreachable_url(), &ai_url, &gibbon_url));

    let (status, _, body) = send(&app, get_request("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["aiService"]["details"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_both_unreachable_reports_unhealthy_503() {
    let app = portal(test_config(
        &unreachable_url(),
        &unreachable_url(),
        &unreachable_url(),
    ));

    let (status, _, body) = send(&app, get_request("/api/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");

    for check in ["aiService", "gibbon"] {
        assert_eq!(body["checks"][check]["status"], "unhealthy");
        assert_eq!(body["checks"][check]["connected"], false);
        assert!(body["checks"][check]["error"].is_string());
    }
}

#[tokio::test]
async fn test_unhealthy_beats_degraded_in_reduction() {
    let ai_url = spawn_upstream(failing_upstream(StatusCode::BAD_GATEWAY)).await;
    let app = portal(test_config(&unreachable_url(), &ai_url, &unreachable_url()));

    let (status, _, body) = send(&app, get_request("/api/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["aiService"]["status"], "degraded");
    assert_eq!(body["checks"]["gibbon"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_hanging_service_times_out_as_unhealthy() {
    let ai_url = spawn_upstream(hanging_upstream()).await;
    let gibbon_url = spawn_upstream(healthy_upstream(json!({"status": "ok"}))).await;
    let app = portal(test_config(&unreachable_url(), &ai_url, &gibbon_url));

    let started = std::time::Instant::now();
    let (status, _, body) = send(&app, get_request("/api/health")).await;

    // bounded by the check budget, not by the hang
    assert!(started.elapsed() < std::time::Duration::from_secs(2));
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");

    let ai = &body["checks"]["aiService"];
    assert_eq!(ai["status"], "unhealthy");
    assert_eq!(ai["connected"], false);
    assert!(ai["error"].as_str().unwrap().contains("timed out"));
}

fn get_request(path: &str) -> axum::http::Request<axum::body::Body> {
    get(path, None)
}
