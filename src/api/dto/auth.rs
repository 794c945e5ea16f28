//! DTOs for login, logout and session status.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Identity;

/// Login credentials. The email is trimmed before validation.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login state of the current session.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub email: Option<String>,
}

impl From<&Identity> for SessionStatus {
    fn from(identity: &Identity) -> Self {
        Self {
            logged_in: identity.is_authenticated(),
            email: identity.email().map(str::to_string),
        }
    }
}
