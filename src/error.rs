//! Application error type and its HTTP mapping.
//!
//! Services return [`AppError`]; handlers convert it into a JSON response at the
//! boundary. Errors rendered for a browser session carry the caller's logged-in
//! indicator via [`AppError::in_session`].

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    logged_in: Option<bool>,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted URL failed the shape check after canonicalization.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// No mapping exists for the requested alias.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Login rejected.
    #[error("{message}")]
    InvalidCredentials { message: String, details: Value },

    /// Malformed request body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unique constraint violation.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Persistence, session store or hashing failure.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_credentials(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    ///
    /// Invalid URLs answer 500 and unknown aliases answer 400; both codes are
    /// part of the public contract existing clients rely on.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials { .. } => StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::InvalidUrl { message, details } => ("invalid_url", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::InvalidCredentials { message, details } => {
                ("invalid_credentials", message, details)
            }
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }

    /// Attaches the caller's logged-in indicator to the rendered error.
    pub fn in_session(self, logged_in: bool) -> SessionError {
        SessionError {
            error: self,
            logged_in,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        render(&self, None)
    }
}

/// An [`AppError`] rendered together with the session's login state.
#[derive(Debug)]
pub struct SessionError {
    pub error: AppError,
    pub logged_in: bool,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        render(&self.error, Some(self.logged_in))
    }
}

fn render(error: &AppError, logged_in: Option<bool>) -> Response {
    if let AppError::Internal { message, details } = error {
        tracing::error!(%message, %details, "Request failed");
    }

    let body = ErrorBody {
        error: error.to_error_info(),
        logged_in,
    };

    (error.status(), Json(body)).into_response()
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request body", json!({ "fields": e.to_string() }))
    }
}

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    tracing::error!(error = %e, "Database error");
    AppError::internal("Database error", json!({}))
}
