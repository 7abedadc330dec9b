use serde::Deserialize;

/// Claims carried in the payload segment of a bearer token.
///
/// Tokens are decoded, never cryptographically verified. Trust is delegated
/// to the issuing backend and to transport (httpOnly cookie, TLS).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id).
    #[serde(rename = "sub")]
    pub subject: String,
    /// Account email.
    pub email: String,
    /// Portal role.
    pub role: String,
    /// Issued-at, epoch seconds.
    #[serde(rename = "iat", default)]
    pub issued_at: Option<i64>,
    /// Expiry, epoch seconds. A token without a numeric expiry is treated
    /// as always expired, never as always valid.
    #[serde(rename = "exp", default)]
    pub expires_at: Option<f64>,
}

/// Why a request carries no usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// No access-token cookie, or an empty one.
    NoToken,
    /// The token did not decode to claims.
    Malformed,
    /// The claims decoded but the expiry has passed (or is missing).
    Expired,
}

/// Authentication state derived from the inbound access-token cookie.
///
/// Computed fresh on every request and never cached server-side; the cookie
/// is the only session store.
#[derive(Debug, Clone)]
pub enum Session {
    Authenticated(TokenClaims),
    Unauthenticated(SessionRejection),
}
