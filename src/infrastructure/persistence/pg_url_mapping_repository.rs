//! PostgreSQL implementation of the URL mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UpsertOutcome, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

/// Constraint that rejects a short URL already used by another mapping.
const SHORT_URL_CONSTRAINT: &str = "url_mappings_short_url_key";

/// Row returned by the upsert: the mapping plus whether it was inserted.
#[derive(sqlx::FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    mapping: UrlMapping,
    inserted: bool,
}

/// PostgreSQL repository for URL mappings.
///
/// Counter updates are single statements, so concurrent callers never lose
/// increments.
pub struct PgUrlMappingRepository {
    pool: Arc<PgPool>,
}

impl PgUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlMappingRepository for PgUrlMappingRepository {
    async fn upsert(&self, new_mapping: NewUrlMapping) -> Result<UpsertOutcome, AppError> {
        // `xmax = 0` only holds for a row version created by this INSERT.
        let result = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO url_mappings (original_url, short_url, owner)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT url_mappings_original_url_owner_key
            DO UPDATE SET times_shortened = url_mappings.times_shortened + 1
            RETURNING id, original_url, short_url, times_shortened, times_accessed,
                      owner, created_at, (xmax = 0) AS inserted
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_url)
        .bind(&new_mapping.owner)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) if row.inserted => Ok(UpsertOutcome::Created(row.mapping)),
            Ok(row) => Ok(UpsertOutcome::Incremented(row.mapping)),
            Err(e) if is_short_url_violation(&e) => Ok(UpsertOutcome::AliasTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn record_access(&self, short_url: &str) -> Result<Option<String>, AppError> {
        let original_url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE url_mappings
            SET times_accessed = times_accessed + 1
            WHERE short_url = $1
            RETURNING original_url
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(original_url)
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlMapping>, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT id, original_url, short_url, times_shortened, times_accessed, owner, created_at
            FROM url_mappings
            WHERE short_url = $1
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
        owner: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT id, original_url, short_url, times_shortened, times_accessed, owner, created_at
            FROM url_mappings
            WHERE original_url = $1 AND owner = $2
            "#,
        )
        .bind(original_url)
        .bind(owner)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

fn is_short_url_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_URL_CONSTRAINT))
}
