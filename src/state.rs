//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::{SessionManager, UrlService, UserService};
use crate::infrastructure::persistence::{PgUrlMappingRepository, PgUserRepository};

/// Services shared by all handlers. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<PgUrlMappingRepository>>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(
        url_service: Arc<UrlService<PgUrlMappingRepository>>,
        user_service: Arc<UserService<PgUserRepository>>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            url_service,
            user_service,
            sessions,
        }
    }
}
