//! Process-local session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use super::store::{SessionData, SessionResult, SessionStore, generate_session_id};

struct Entry {
    data: SessionData,
    expires_at: Instant,
}

/// In-memory session store.
///
/// Used when Redis is not configured. Sessions do not survive a restart and
/// are not shared between instances. Expired entries are dropped lazily on
/// access and swept whenever a session is created.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        debug!("Using in-memory session store");
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of stored (possibly expired) sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, data: SessionData) -> SessionResult<String> {
        let id = generate_session_id()?;
        let now = Instant::now();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            id.clone(),
            Entry {
                data,
                expires_at: now + self.ttl,
            },
        );

        Ok(id)
    }

    async fn load(&self, id: &str) -> SessionResult<Option<SessionData>> {
        let now = Instant::now();

        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.data.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        self.sessions.write().await.remove(id);
        Ok(None)
    }

    async fn save(&self, id: &str, data: SessionData) -> SessionResult<()> {
        self.sessions.write().await.insert(
            id.to_string(),
            Entry {
                data,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(())
    }

    async fn destroy(&self, id: &str) -> SessionResult<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
