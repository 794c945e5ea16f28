//! Handlers for login, logout and session status.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, SessionStatus};
use crate::application::services::CurrentSession;
use crate::error::{AppError, SessionError};
use crate::state::AppState;

/// Reports whether the current session is logged in.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// ```json
/// { "logged_in": true, "email": "alice@example.com" }
/// ```
pub async fn session_status_handler(
    Extension(session): Extension<CurrentSession>,
) -> Json<SessionStatus> {
    Json(SessionStatus::from(&session.identity))
}

/// Logs in, registering unknown emails when auto-registration is on.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "password": "secret" }
/// ```
///
/// # Response
///
/// `200 OK` with `{ "logged_in": true, "email": ... }` and a `Set-Cookie`
/// header carrying a fresh session id.
///
/// # Errors
///
/// Returns 400 Bad Request for wrong credentials or a malformed body.
pub async fn login_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, SessionError> {
    let logged_in = session.logged_in();

    let (cookie, email) = login(&state, &session, payload)
        .await
        .map_err(|e| e.in_session(logged_in))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionStatus {
            logged_in: true,
            email: Some(email),
        }),
    ))
}

async fn login(
    state: &AppState,
    session: &CurrentSession,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(String, String), AppError> {
    let Json(payload) = payload?;

    let request = LoginRequest {
        email: payload.email.trim().to_string(),
        password: payload.password,
    };
    request.validate().map_err(|e| {
        AppError::bad_request("Invalid login request", json!({ "fields": e.to_string() }))
    })?;

    let user = state
        .user_service
        .login(&request.email, &request.password)
        .await?;

    let cookie = state.sessions.login(session, &user).await?;

    Ok((cookie, user.email))
}

/// Logs out and rotates the session id.
///
/// # Endpoint
///
/// `POST /logout`
///
/// # Response
///
/// `200 OK` with `{ "logged_in": false }` and a `Set-Cookie` header for the new,
/// anonymous session. Logging out an anonymous session is not an error.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> Result<impl IntoResponse, SessionError> {
    let cookie = state
        .sessions
        .logout(&session)
        .await
        .map_err(|e| e.in_session(session.logged_in()))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "logged_in": false })),
    ))
}
