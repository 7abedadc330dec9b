use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::{HeaderMap, HeaderValue, header};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::session::{Session, SessionRejection, TokenClaims};
use crate::models::user::AuthenticatedUser;

/// Decodes the claims carried in a bearer token.
///
/// The token must have the three-segment `header.payload.signature` shape;
/// only the payload segment is interpreted. The signature is required
/// structurally but never verified here.
pub fn decode(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    sonic_rs::from_slice(&bytes).ok()
}

/// Whether a token is past its expiry.
///
/// Fail-closed: undecodable tokens and tokens without a numeric expiry
/// count as expired.
pub fn is_expired(token: &str) -> bool {
    match decode(token) {
        Some(claims) => expired_at(&claims, now_millis()),
        None => true,
    }
}

pub(crate) fn expired_at(claims: &TokenClaims, now_millis: u64) -> bool {
    match claims.expires_at {
        Some(expires_at) => expires_at * 1000.0 < now_millis as f64,
        None => true,
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(u64::MAX)
}

/// Extracts the identity fields from a token without checking expiry.
///
/// Callers needing freshness compose this with `is_expired`, or use
/// `session_from_token` which checks both.
pub fn user_from_token(token: &str) -> Option<AuthenticatedUser> {
    decode(token).map(AuthenticatedUser::from)
}

/// Derives the full authentication state from an optional cookie value.
pub fn session_from_token(token: Option<&str>) -> Session {
    let Some(token) = token.filter(|token| !token.is_empty()) else {
        return Session::Unauthenticated(SessionRejection::NoToken);
    };

    match decode(token) {
        None => Session::Unauthenticated(SessionRejection::Malformed),
        Some(claims) if expired_at(&claims, now_millis()) => {
            Session::Unauthenticated(SessionRejection::Expired)
        }
        Some(claims) => Session::Authenticated(claims),
    }
}

/// Builds the headers for an authenticated upstream call.
///
/// Total: an empty token still yields `Bearer `.
pub fn create_auth_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
        .unwrap_or_else(|_| HeaderValue::from_static("Bearer "));
    headers.insert(header::AUTHORIZATION, bearer);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers
}
