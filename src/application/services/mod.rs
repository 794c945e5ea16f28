//! Business logic services for the application layer.

pub mod session_manager;
pub mod url_service;
pub mod user_service;

pub use session_manager::{CurrentSession, SessionManager};
pub use url_service::UrlService;
pub use user_service::UserService;
