//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the session store, and provide the
//! operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::UrlService`] - shortening, resolution and access counting
//! - [`services::UserService`] - registration and credential checks
//! - [`services::SessionManager`] - session cookies, login and logout

pub mod services;
