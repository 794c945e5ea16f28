//! API route configuration.
//!
//! Routes here read the current session, so they are wrapped by
//! [`crate::api::middleware::session`].

use crate::api::handlers::{
    login_handler, logout_handler, redirect_handler, session_status_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All session-aware routes.
///
/// # Endpoints
///
/// - `GET  /`        - Session status
/// - `POST /`        - Shorten a URL
/// - `POST /login`   - Log in (or register)
/// - `POST /logout`  - Log out
/// - `GET  /{alias}` - Redirect to the original URL
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(session_status_handler).post(shorten_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/{alias}", get(redirect_handler))
}
