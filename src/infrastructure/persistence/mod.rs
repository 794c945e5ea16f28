//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements.
//!
//! # Repositories
//!
//! - [`PgUrlMappingRepository`] - URL mappings and their counters
//! - [`PgUserRepository`] - User accounts

pub mod pg_url_mapping_repository;
pub mod pg_user_repository;

pub use pg_url_mapping_repository::PgUrlMappingRepository;
pub use pg_user_repository::PgUserRepository;
