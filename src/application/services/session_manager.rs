//! Browser session handling on top of a [`SessionStore`].

use std::sync::Arc;

use crate::domain::entities::{Identity, User};
use crate::error::AppError;
use crate::infrastructure::session::{SessionData, SessionStore, SessionStoreError};
use crate::utils::session_cookie::{CookieSigner, find_session_cookie};
use serde_json::json;
use tracing::{debug, info};

/// The session attached to the current request.
///
/// `id` is `None` when the request carried no valid session cookie or the
/// session has expired.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub id: Option<String>,
    pub identity: Identity,
}

impl CurrentSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn logged_in(&self) -> bool {
        self.identity.is_authenticated()
    }
}

/// Resolves session cookies and rotates sessions on login and logout.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    signer: CookieSigner,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, signer: CookieSigner) -> Self {
        Self { store, signer }
    }

    /// Resolves the session from a raw `Cookie` header.
    ///
    /// Missing, forged and expired cookies all resolve to an anonymous session
    /// without an id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the session store fails.
    pub async fn resolve(&self, cookie_header: Option<&str>) -> Result<CurrentSession, AppError> {
        let Some(session_id) = cookie_header
            .and_then(find_session_cookie)
            .and_then(|value| self.signer.verify(value))
        else {
            return Ok(CurrentSession::anonymous());
        };

        match self.store.load(&session_id).await.map_err(store_error)? {
            Some(data) => Ok(CurrentSession {
                id: Some(session_id),
                identity: Identity::from(data.user),
            }),
            None => {
                debug!("Session cookie refers to an unknown or expired session");
                Ok(CurrentSession::anonymous())
            }
        }
    }

    /// Attaches `user` to a fresh session id and returns its `Set-Cookie` value.
    ///
    /// The previous session, if any, is destroyed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the session store fails.
    pub async fn login(&self, current: &CurrentSession, user: &User) -> Result<String, AppError> {
        let data = SessionData::for_user(user.snapshot());
        let session_id = self.rotate(current, data).await?;

        info!(user_id = user.id, "User logged in");
        Ok(self.signer.set_cookie(&session_id))
    }

    /// Detaches the user and returns the `Set-Cookie` value of a fresh,
    /// anonymous session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the session store fails.
    pub async fn logout(&self, current: &CurrentSession) -> Result<String, AppError> {
        let session_id = self.rotate(current, SessionData::anonymous()).await?;

        if current.logged_in() {
            info!("User logged out");
        }
        Ok(self.signer.set_cookie(&session_id))
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    async fn rotate(&self, current: &CurrentSession, data: SessionData) -> Result<String, AppError> {
        let result = match &current.id {
            Some(old_id) => self.store.regenerate(old_id, data).await,
            None => self.store.create(data).await,
        };
        result.map_err(store_error)
    }
}

fn store_error(e: SessionStoreError) -> AppError {
    AppError::internal("Session store error", json!({ "reason": e.to_string() }))
}
