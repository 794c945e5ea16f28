//! Alias generation for shortened URLs.
//!
//! An alias is a deterministic function of the canonical URL and a salt (the
//! owner's email, or empty for anonymous requests): the first
//! [`ALIAS_LENGTH`] characters of the URL-safe base64 encoding of
//! `SHA-256(url + salt)`.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Number of characters kept from the encoded digest.
pub const ALIAS_LENGTH: usize = 7;

/// Number of candidate aliases tried before giving up on a collision.
pub const MAX_ALIAS_ATTEMPTS: u32 = 8;

/// Derives the alias for `url` salted with `salt`.
///
/// `attempt` selects the candidate after collisions: attempt 0 hashes
/// `url + salt`, attempt `n` hashes `url + salt + "#" + n`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(generate_alias("example.com/page", "", 0), "1kHz7Po");
/// ```
pub fn generate_alias(url: &str, salt: &str, attempt: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(salt.as_bytes());
    if attempt > 0 {
        hasher.update(format!("#{}", attempt).as_bytes());
    }

    let mut encoded = base64::engine::general_purpose::URL_SAFE.encode(hasher.finalize());
    encoded.truncate(ALIAS_LENGTH);
    encoded
}

/// Composes the full short URL, `host:port/alias`.
pub fn compose_short_url(public_host: &str, alias: &str) -> String {
    format!("{}/{}", public_host.trim_end_matches('/'), alias)
}
