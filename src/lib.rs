use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_cookies::CookieManagerLayer;

pub mod config;
pub mod error;
pub mod state;
pub mod store;

pub mod models {
    pub mod health;
    pub mod session;
    pub mod user;
}

pub mod services {
    pub mod health;
    pub mod session;
    pub mod token;
    pub mod upstream;
}

pub mod handlers {
    pub mod auth;
    pub mod health;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod auth;
}

use state::AppState;

/// Assembles the portal API router.
///
/// Rate limiting and request tracing are applied by the binary; everything
/// the routes themselves need (cookie plumbing included) is wired here so
/// tests can drive the router directly.
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/health", get(handlers::health::health))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/profile", get(handlers::auth::profile))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CookieManagerLayer::new())
}
