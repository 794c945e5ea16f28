//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`   - Health check: database, session store
//! - `GET  /`         - Session status
//! - `POST /`         - Shorten a URL
//! - `POST /login`    - Log in
//! - `POST /logout`   - Log out
//! - `GET  /{alias}`  - Redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Session** - Cookie resolution for every route except `/health`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{session, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware except path
/// normalization.
pub fn router(state: AppState) -> Router {
    let session_routes = api::routes::session_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), session::layer),
    );

    Router::new()
        .route("/health", get(health_handler))
        .merge(session_routes)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] behind trailing-slash
/// normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
