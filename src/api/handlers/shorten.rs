//! Handler for the shortening endpoint.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::CurrentSession;
use crate::domain::entities::UrlMapping;
use crate::error::{AppError, SessionError};
use crate::state::AppState;

/// Shortens a URL for the current session's identity.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "url": "http://www.example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortened_url": "localhost:3000/1kHz7Po",
///   "original_url": "example.com/page",
///   "times_shortened": 1,
///   "times_accessed": 0,
///   "logged_in": false
/// }
/// ```
///
/// Shortening the same URL again returns the same `shortened_url` with
/// `times_shortened` incremented.
///
/// # Errors
///
/// Returns 500 with code `invalid_url` if the URL fails validation.
/// Returns 400 Bad Request if the body is malformed.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), SessionError> {
    let logged_in = session.logged_in();

    let mapping = shorten(&state, &session, payload)
        .await
        .map_err(|e| e.in_session(logged_in))?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(mapping, logged_in)),
    ))
}

async fn shorten(
    state: &AppState,
    session: &CurrentSession,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<UrlMapping, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    state
        .url_service
        .shorten_url(&payload.url, &session.identity)
        .await
}
