//! URL mapping entity: one shortened URL and its usage counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored mapping from a canonical URL (per owner) to its short URL.
///
/// `owner` is the owning user's email, or an empty string for anonymous
/// requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub times_shortened: i64,
    pub times_accessed: i64,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Returns true if the mapping was created without a logged-in user.
    pub fn is_anonymous(&self) -> bool {
        self.owner.is_empty()
    }

    /// The alias part of the short URL (everything after the last `/`).
    pub fn alias(&self) -> &str {
        self.short_url
            .rsplit_once('/')
            .map_or(self.short_url.as_str(), |(_, alias)| alias)
    }
}

/// Input for the shorten upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_url: String,
    pub owner: String,
}

/// Result of an atomic shorten upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No mapping existed for (url, owner); a new row was inserted.
    Created(UrlMapping),
    /// The (url, owner) mapping already existed; `times_shortened` was incremented.
    Incremented(UrlMapping),
    /// The candidate short URL already belongs to a different (url, owner) pair.
    AliasTaken,
}
