#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::header::{CONTENT_TYPE, COOKIE};
use http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use parent_portal::config::Config;
use parent_portal::state::AppState;

/// A config pointing every upstream at the given URLs, with short timeouts
/// so failure scenarios resolve quickly.
pub fn test_config(auth_url: &str, ai_url: &str, gibbon_url: &str) -> Config {
    Config {
        port: 0,
        ai_service_url: ai_url.to_string(),
        gibbon_url: gibbon_url.to_string(),
        auth_service_url: auth_url.to_string(),
        access_token_max_age: 604_800,
        refresh_token_max_age: 2_592_000,
        health_check_timeout_ms: 500,
        upstream_timeout_ms: 2_000,
    }
}

/// Builds the portal router over the given config.
pub fn portal(config: Config) -> Router {
    let state = AppState::new(&config).expect("failed to build AppState");
    parent_portal::app(state)
}

/// Spawns a throwaway upstream server on a random port and returns its URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A local URL nothing listens on, for connection-refused scenarios.
pub fn unreachable_url() -> String {
    "http://127.0.0.1:1".to_string()
}

/// Sends one request through the router and collects status, headers, and
/// the parsed JSON body (null when the body is empty).
pub async fn send(
    app: &Router,
    request: Request<Body>,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

/// Builds a JSON POST request, optionally with a Cookie header.
pub fn post_json(path: &str, body: &serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Builds a GET request, optionally with a Cookie header.
pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn encode_segment(raw: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(raw)
}

/// Builds a structurally valid three-segment token around the given claims.
pub fn make_token(sub: &str, email: &str, role: &str, exp: Option<f64>) -> String {
    let mut claims = serde_json::json!({
        "sub": sub,
        "email": email,
        "role": role,
        "iat": 1_700_000_000,
    });
    if let Some(exp) = exp {
        claims["exp"] = serde_json::json!(exp);
    }

    format!(
        "{}.{}.{}",
        encode_segment(br#"{"alg":"HS256","typ":"JWT"}"#),
        encode_segment(claims.to_string().as_bytes()),
        encode_segment(b"test-signature")
    )
}

/// Epoch seconds for building relative expiry claims.
pub fn epoch_secs_now() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
}

/// All Set-Cookie header values of a response, as strings.
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(http::header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}
