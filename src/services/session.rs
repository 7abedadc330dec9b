use tower_cookies::cookie::SameSite;
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};

use crate::models::session::Session;
use crate::services::token;

/// Name of the access-token cookie.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Name of the refresh-token cookie.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Default access-cookie lifetime: 7 days.
pub const DEFAULT_ACCESS_TOKEN_MAX_AGE: i64 = 604_800;
/// Default refresh-cookie lifetime: 30 days.
pub const DEFAULT_REFRESH_TOKEN_MAX_AGE: i64 = 2_592_000;

/// The tokens to materialize as session cookies.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    /// The refresh cookie is only set when a refresh token is supplied.
    pub refresh_token: Option<String>,
    pub access_max_age: Option<i64>,
    pub refresh_max_age: Option<i64>,
}

/// Creates a session cookie with the given name, value, and max age.
fn secure_cookie(name: &str, value: String, max_age_secs: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), value);

    let is_production =
        std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()) == "production";

    cookie.set_http_only(true);

    if is_production {
        cookie.set_secure(true);
    }

    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(Duration::seconds(max_age_secs));
    cookie.set_path("/");

    cookie
}

/// Issues the session cookies for a freshly authenticated user.
pub fn issue_session(cookies: &Cookies, tokens: SessionTokens) {
    let access_max_age = tokens
        .access_max_age
        .unwrap_or(DEFAULT_ACCESS_TOKEN_MAX_AGE);
    cookies.add(secure_cookie(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token,
        access_max_age,
    ));

    if let Some(refresh_token) = tokens.refresh_token {
        let refresh_max_age = tokens
            .refresh_max_age
            .unwrap_or(DEFAULT_REFRESH_TOKEN_MAX_AGE);
        cookies.add(secure_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token,
            refresh_max_age,
        ));
    }
}

/// Clears both session cookies by overwriting them with empty values and
/// immediate expiry.
pub fn clear_session(cookies: &Cookies) {
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        cookies.add(secure_cookie(name, String::new(), 0));
    }
}

/// Cheap presence check used by routing middleware.
///
/// True iff the access cookie exists with a non-empty value. Does not decode
/// or validate the token; full validation happens where claims are consumed.
pub fn request_is_authenticated(cookies: &Cookies) -> bool {
    cookies
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| !cookie.value().is_empty())
        .unwrap_or(false)
}

/// Derives the authentication state from the inbound access cookie.
pub fn session_from_cookies(cookies: &Cookies) -> Session {
    let token = cookies
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string());
    token::session_from_token(token.as_deref())
}
