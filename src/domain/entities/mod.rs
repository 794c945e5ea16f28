//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`UrlMapping`] - A shortened URL with its usage counters
//! - [`User`] - A registered account
//! - [`Identity`] - Anonymous or authenticated caller
//!
//! Creation inputs live next to their entities (`NewUrlMapping`, `NewUser`).

pub mod url_mapping;
pub mod user;

pub use url_mapping::{NewUrlMapping, UpsertOutcome, UrlMapping};
pub use user::{Identity, NewUser, SessionUser, User};
