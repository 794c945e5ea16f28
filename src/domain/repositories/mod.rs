//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UrlMappingRepository`] - Shortened URL mappings and their counters
//! - [`UserRepository`] - User accounts
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod url_mapping_repository;
pub mod user_repository;

pub use url_mapping_repository::UrlMappingRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use url_mapping_repository::MockUrlMappingRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
