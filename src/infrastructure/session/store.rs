//! Session store trait and error types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::SessionUser;

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store connection error: {0}")]
    Connection(String),

    #[error("Session store operation error: {0}")]
    Operation(String),

    #[error("Session payload error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionStoreError>;

/// Server-side state of one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user: Option<SessionUser>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    /// A session with no user attached.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            created_at: Utc::now(),
        }
    }

    pub fn for_user(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            created_at: Utc::now(),
        }
    }
}

/// Storage for sessions keyed by opaque session id.
///
/// Ids are generated by the store; callers never choose them. Entries expire
/// after the store's TTL.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::MemorySessionStore`] - process-local map
/// - [`crate::infrastructure::session::RedisSessionStore`] - Redis-backed, shared across instances
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `data` under a fresh id and returns the id.
    async fn create(&self, data: SessionData) -> SessionResult<String>;

    /// Loads a live session. Unknown or expired ids yield `Ok(None)`.
    async fn load(&self, id: &str) -> SessionResult<Option<SessionData>>;

    /// Overwrites the data of an existing id and refreshes its expiry.
    async fn save(&self, id: &str, data: SessionData) -> SessionResult<()>;

    /// Removes a session. Removing an unknown id is not an error.
    async fn destroy(&self, id: &str) -> SessionResult<()>;

    /// Destroys `id` and stores `data` under a new id, which is returned.
    async fn regenerate(&self, id: &str, data: SessionData) -> SessionResult<String> {
        self.destroy(id).await?;
        self.create(data).await
    }

    /// Checks if the backend is healthy.
    async fn health_check(&self) -> bool;
}

/// Generates a new session id: 32 bytes from the OS RNG, URL-safe base64.
pub fn generate_session_id() -> SessionResult<String> {
    use base64::Engine as _;

    let mut buffer = [0u8; 32];
    getrandom::fill(&mut buffer)
        .map_err(|e| SessionStoreError::Operation(format!("OS RNG failed: {}", e)))?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
