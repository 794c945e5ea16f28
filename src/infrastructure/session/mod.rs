//! Server-side session storage.
//!
//! Provides a [`SessionStore`] trait with two implementations:
//! - [`MemorySessionStore`] - process-local, used when Redis is not configured
//! - [`RedisSessionStore`] - shared Redis-backed storage

mod memory_store;
mod redis_store;
mod store;

pub use memory_store::MemorySessionStore;
pub use redis_store::RedisSessionStore;
pub use store::{
    SessionData, SessionResult, SessionStore, SessionStoreError, generate_session_id,
};
