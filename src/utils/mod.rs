//! Utility functions shared across the application.
//!
//! - [`alias`] - Alias derivation and short URL composition
//! - [`url_canonicalizer`] - URL canonicalization and shape validation
//! - [`password`] - Argon2id password hashing
//! - [`session_cookie`] - Signed session cookie encoding

pub mod alias;
pub mod password;
pub mod session_cookie;
pub mod url_canonicalizer;
