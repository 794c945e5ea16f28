//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UpsertOutcome, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for shortened URL mappings.
///
/// Every counter change is a single atomic statement; implementations must not
/// read-then-write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Inserts a mapping or, if one exists for `(original_url, owner)`,
    /// increments its `times_shortened` counter.
    ///
    /// The existing row keeps its short URL; `new_mapping.short_url` is only
    /// used for inserts.
    ///
    /// # Returns
    ///
    /// - [`UpsertOutcome::Created`] for a fresh row
    /// - [`UpsertOutcome::Incremented`] for an existing `(original_url, owner)` row
    /// - [`UpsertOutcome::AliasTaken`] if the short URL belongs to another row
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, new_mapping: NewUrlMapping) -> Result<UpsertOutcome, AppError>;

    /// Increments `times_accessed` for the mapping with this exact short URL
    /// and returns its original URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(original_url))` if found
    /// - `Ok(None)` if no mapping uses this short URL
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_access(&self, short_url: &str) -> Result<Option<String>, AppError>;

    /// Finds a mapping by its short URL without touching counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds the mapping for a canonical URL and owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_original_url(
        &self,
        original_url: &str,
        owner: &str,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Checks that the backing store answers queries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
