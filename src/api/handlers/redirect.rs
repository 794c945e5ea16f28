//! Handler for short URL redirect.

use axum::{
    Extension,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;

use crate::application::services::CurrentSession;
use crate::error::{AppError, SessionError};
use crate::state::AppState;

/// Redirects an alias to its original URL and counts the access.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response
///
/// `301 Moved Permanently` with `Location: http://<original_url>`. Stored URLs
/// have no scheme, so the redirect always uses `http://`.
///
/// # Errors
///
/// Returns 400 Bad Request if no mapping exists for the alias.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> Result<impl IntoResponse, SessionError> {
    let original_url = state
        .url_service
        .resolve_alias(&alias)
        .await
        .map_err(|e| e.in_session(session.logged_in()))?;

    debug!(%alias, "Redirecting");

    let location = HeaderValue::try_from(format!("http://{}", original_url)).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid header value",
            json!({ "reason": e.to_string() }),
        )
        .in_session(session.logged_in())
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
