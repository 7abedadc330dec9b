use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::error::AppError;
use crate::services::session;
use crate::state::AppState;

/// A middleware that requires an access-token cookie to be present.
///
/// Presence-only by design: decoding and expiry checks happen where the
/// claims are consumed. The denied path is remembered so a later login can
/// send the user back to it.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !session::request_is_authenticated(&cookies) {
        let path = request.uri().path();
        tracing::warn!("❌ No access token cookie for {}", path);
        state.redirects.remember(path);
        return Err(AppError::Authentication("Not authenticated".to_string()));
    }

    Ok(next.run(request).await)
}
