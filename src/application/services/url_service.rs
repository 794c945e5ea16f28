//! URL shortening and resolution service.

use std::sync::Arc;

use crate::domain::entities::{Identity, NewUrlMapping, UpsertOutcome, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;
use crate::utils::alias::{MAX_ALIAS_ATTEMPTS, compose_short_url, generate_alias};
use crate::utils::url_canonicalizer::{clean_url, is_valid_url};
use serde_json::json;
use tracing::{debug, info, warn};

/// Service for shortening URLs and resolving short URLs back to them.
///
/// Short URLs are `public_host/alias`, where `public_host` is the configured
/// `HOST:PORT`.
pub struct UrlService<R: UrlMappingRepository> {
    repository: Arc<R>,
    public_host: String,
}

impl<R: UrlMappingRepository> UrlService<R> {
    /// Creates a new URL service.
    ///
    /// # Arguments
    ///
    /// - `repository` - mapping storage
    /// - `public_host` - `HOST:PORT` prefix of every short URL
    pub fn new(repository: Arc<R>, public_host: String) -> Self {
        Self {
            repository,
            public_host,
        }
    }

    /// Shortens a URL on behalf of `identity`.
    ///
    /// The URL is canonicalized (scheme and `www.` stripped) and validated.
    /// The first request for a (URL, owner) pair creates a mapping with
    /// `times_shortened = 1`; later requests increment that counter and return
    /// the same short URL. Both paths are one atomic upsert.
    ///
    /// # Alias Collisions
    ///
    /// If the derived short URL already belongs to another (URL, owner) pair,
    /// the next candidate alias is tried, up to [`MAX_ALIAS_ATTEMPTS`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the canonical URL fails validation;
    /// nothing is persisted in that case.
    /// Returns [`AppError::Internal`] on database errors or when every
    /// candidate alias is taken.
    pub async fn shorten_url(&self, url: &str, identity: &Identity) -> Result<UrlMapping, AppError> {
        let canonical = clean_url(url);

        if !is_valid_url(&canonical) {
            return Err(AppError::invalid_url("Invalid URL", json!({ "url": url })));
        }

        let owner = identity.owner();

        for attempt in 0..MAX_ALIAS_ATTEMPTS {
            let alias = generate_alias(&canonical, owner, attempt);

            let new_mapping = NewUrlMapping {
                original_url: canonical.clone(),
                short_url: self.short_url_for(&alias),
                owner: owner.to_string(),
            };

            match self.repository.upsert(new_mapping).await? {
                UpsertOutcome::Created(mapping) => {
                    info!(short_url = %mapping.short_url, "Created URL mapping");
                    return Ok(mapping);
                }
                UpsertOutcome::Incremented(mapping) => {
                    debug!(
                        short_url = %mapping.short_url,
                        times_shortened = mapping.times_shortened,
                        "URL shortened again"
                    );
                    return Ok(mapping);
                }
                UpsertOutcome::AliasTaken => {
                    warn!(%alias, attempt, "Alias collision, trying next candidate");
                }
            }
        }

        Err(AppError::internal(
            "Failed to allocate alias",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves a full short URL to its original URL, counting the access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping uses this short URL.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_shortened_url(&self, short_url: &str) -> Result<String, AppError> {
        self.repository
            .record_access(short_url)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    format!("Shortened url {} does not exist", short_url),
                    json!({ "short_url": short_url }),
                )
            })
    }

    /// Resolves an alias (the path segment) to its original URL.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_shortened_url`].
    pub async fn resolve_alias(&self, alias: &str) -> Result<String, AppError> {
        self.resolve_shortened_url(&self.short_url_for(alias)).await
    }

    /// Looks up a mapping by alias without counting an access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping uses this alias.
    pub async fn find_by_alias(&self, alias: &str) -> Result<UrlMapping, AppError> {
        let short_url = self.short_url_for(alias);

        self.repository
            .find_by_short_url(&short_url)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    format!("Shortened url {} does not exist", short_url),
                    json!({ "short_url": short_url }),
                )
            })
    }

    /// Composes `HOST:PORT/alias`.
    pub fn short_url_for(&self, alias: &str) -> String {
        compose_short_url(&self.public_host, alias)
    }

    /// Checks that the mapping store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store does not answer.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
