use serde::Serialize;

use crate::models::session::TokenClaims;

/// The identity fields exposed to the portal frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    /// The user's id (the token subject).
    pub id: String,
    /// The account email.
    pub email: String,
    /// The portal role.
    pub role: String,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.subject,
            email: claims.email,
            role: claims.role,
        }
    }
}
