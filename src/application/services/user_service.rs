//! User registration and login.

use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::PasswordHasherConfig;
use serde_json::json;
use tracing::{info, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Service for user accounts and credential checks.
///
/// Argon2 hashing is CPU-bound and runs on the blocking thread pool.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasherConfig,
    auto_register: bool,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    ///
    /// With `auto_register` enabled, a login with an unknown email creates the
    /// account.
    pub fn new(repository: Arc<R>, hasher: PasswordHasherConfig, auto_register: bool) -> Self {
        Self {
            repository,
            hasher,
            auto_register,
        }
    }

    /// Registers a user with a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty email or password.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn create_user(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        if email.is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "Email and password are required",
                json!({}),
            ));
        }

        let password_hash = self.hash_password(password).await?;

        let user = self
            .repository
            .create(NewUser {
                email: email.clone(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "Email already registered",
                    json!({ "email": email }),
                ),
                other => other,
            })?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Checks credentials and returns the user they belong to.
    ///
    /// An existing email requires the matching password. An unknown email is
    /// registered on the spot when auto-registration is on; two concurrent
    /// first logins for the same email end with one account, and the loser is
    /// checked against it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] for a wrong password, or for an
    /// unknown email when auto-registration is off.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        if let Some(user) = self.repository.find_by_email(&email).await? {
            return self.check_password(user, password).await;
        }

        if !self.auto_register {
            return Err(invalid_credentials());
        }

        match self.create_user(&email, password).await {
            Ok(user) => Ok(user),
            Err(AppError::Conflict { .. }) => {
                let user = self
                    .repository
                    .find_by_email(&email)
                    .await?
                    .ok_or_else(|| {
                        AppError::internal("User vanished after conflict", json!({}))
                    })?;
                self.check_password(user, password).await
            }
            Err(AppError::Validation { .. }) => Err(invalid_credentials()),
            Err(e) => Err(e),
        }
    }

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    async fn check_password(&self, user: User, password: &str) -> Result<User, AppError> {
        if self.verify_password(password, &user.password_hash).await? {
            Ok(user)
        } else {
            warn!(user_id = user.id, "Login with wrong password");
            Err(invalid_credentials())
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                AppError::internal("Password hashing task failed", json!({ "reason": e.to_string() }))
            })?
            .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| {
                AppError::internal("Password hashing task failed", json!({ "reason": e.to_string() }))
            })?
            .map_err(|e| {
                AppError::internal("Failed to verify password", json!({ "reason": e.to_string() }))
            })
    }
}

/// Emails are compared trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::invalid_credentials(INVALID_CREDENTIALS, json!({}))
}
