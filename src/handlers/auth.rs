use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sonic_rs::{JsonValueTrait, Value};
use tower_cookies::Cookies;

use crate::{
    error::{AppError, Result},
    models::session::Session,
    models::user::AuthenticatedUser,
    services::session::{self as session_service, SessionTokens},
    services::upstream,
    state::AppState,
    validation::auth::*,
};

/// The request payload for login.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The request payload for registration.
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// The response payload for a successful login.
#[derive(Serialize)]
pub struct LoginResponse {
    pub user: Value,
    pub message: String,
    #[serde(rename = "redirectTo")]
    pub redirect_to: String,
}

/// The response payload for a successful registration.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub user: Value,
    pub message: String,
}

/// The response payload for `GET /api/auth/me`.
#[derive(Serialize)]
pub struct MeResponse {
    pub user: AuthenticatedUser,
}

/// A bare confirmation message.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Handles login by proxying the credentials to the upstream auth service
/// and materializing its token as session cookies.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt for {}", payload.email);
    validate_email(&payload.email)?;
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let reply = state.auth.post_json("/auth/login", &payload).await?;
    match reply.status {
        StatusCode::OK => {}
        StatusCode::UNAUTHORIZED => {
            tracing::warn!("❌ Invalid credentials for {}", payload.email);
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }
        StatusCode::UNPROCESSABLE_ENTITY => {
            return Err(AppError::Unprocessable(upstream::error_message(&reply)));
        }
        status => {
            return Err(AppError::Internal(format!(
                "Unexpected auth service response: {status}"
            )));
        }
    }

    let (access_token, refresh_token, user) = parse_auth_body(reply.body)?;

    session_service::issue_session(
        &cookies,
        SessionTokens {
            access_token,
            refresh_token,
            access_max_age: Some(state.config.access_token_max_age),
            refresh_max_age: Some(state.config.refresh_token_max_age),
        },
    );
    tracing::info!("✅ Session cookies issued for {}", payload.email);

    let response = LoginResponse {
        user,
        message: "Login successful".to_string(),
        redirect_to: state.redirects.take(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Handles registration, mirroring the login error mapping plus 409 for
/// duplicate accounts. The raw token never appears in the response body.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response> {
    tracing::info!("📝 Register attempt for {}", payload.email);
    validate_name("First name", &payload.first_name)?;
    validate_name("Last name", &payload.last_name)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    if let Some(ref phone) = payload.phone {
        validate_phone(phone)?;
    }

    let reply = state.auth.post_json("/auth/register", &payload).await?;
    match reply.status {
        StatusCode::CREATED => {}
        StatusCode::CONFLICT => {
            tracing::warn!("❌ Duplicate account for {}", payload.email);
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }
        StatusCode::UNPROCESSABLE_ENTITY => {
            return Err(AppError::Unprocessable(upstream::error_message(&reply)));
        }
        status => {
            return Err(AppError::Internal(format!(
                "Unexpected auth service response: {status}"
            )));
        }
    }

    let (access_token, _refresh_token, user) = parse_auth_body(reply.body)?;

    session_service::issue_session(
        &cookies,
        SessionTokens {
            access_token,
            refresh_token: None,
            access_max_age: Some(state.config.access_token_max_age),
            refresh_max_age: None,
        },
    );
    tracing::info!("✅ User registered: {}", payload.email);

    let response = RegisterResponse {
        user,
        message: "Registration successful. Welcome!".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Returns the identity derived from the access-token cookie.
#[axum::debug_handler]
pub async fn me(cookies: Cookies) -> Result<Json<MeResponse>> {
    match session_service::session_from_cookies(&cookies) {
        Session::Authenticated(claims) => Ok(Json(MeResponse {
            user: AuthenticatedUser::from(claims),
        })),
        Session::Unauthenticated(reason) => {
            tracing::debug!("Rejected identity request: {:?}", reason);
            Err(AppError::Authentication("Not authenticated".to_string()))
        }
    }
}

/// Handles logout by clearing both session cookies.
#[axum::debug_handler]
pub async fn logout(cookies: Cookies) -> Result<Json<MessageResponse>> {
    session_service::clear_session(&cookies);
    tracing::info!("👋 Session cookies cleared");

    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

/// Proxies the profile of the signed-in user from the upstream auth service.
#[axum::debug_handler]
pub async fn profile(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    let token = cookies
        .get(session_service::ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default();

    match state.auth.fetch_json("/auth/profile", &token).await? {
        Some(body) => Ok(Json(body).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Pulls the token, optional refresh token, and user object out of a
/// successful upstream auth reply.
fn parse_auth_body(body: Option<Value>) -> Result<(String, Option<String>, Value)> {
    let body = body.ok_or_else(|| {
        AppError::Internal("Empty response from authentication service".to_string())
    })?;

    let access_token = body
        .get("token")
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Internal("Malformed response from authentication service".to_string())
        })?;

    let refresh_token = body
        .get("refresh_token")
        .and_then(|value| value.as_str())
        .map(str::to_string);

    let user = body
        .get("user")
        .cloned()
        .unwrap_or_else(|| sonic_rs::json!({}));

    Ok((access_token, refresh_token, user))
}
