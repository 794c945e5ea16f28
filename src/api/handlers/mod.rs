//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod session;
pub mod shorten;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use session::{login_handler, logout_handler, session_status_handler};
pub use shorten::shorten_handler;
