//! Redis-backed session store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

use super::store::{
    SessionData, SessionResult, SessionStore, SessionStoreError, generate_session_id,
};

/// Redis session store.
///
/// Sessions are stored as JSON under `session:<id>` with a Redis TTL, so they
/// are shared by every instance pointing at the same Redis. Unlike a cache,
/// failures are propagated: a lost session means a silently logged-out user.
pub struct RedisSessionStore {
    client: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl: Duration) -> SessionResult<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url).map_err(|e| {
            SessionStoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            SessionStoreError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| SessionStoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds: ttl.as_secs().max(1),
            key_prefix: "session:".to_string(),
        })
    }

    fn build_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }

    async fn write(&self, id: &str, data: &SessionData) -> SessionResult<()> {
        let payload = serde_json::to_string(data)?;
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(self.build_key(id), payload, self.ttl_seconds)
            .await
            .map_err(|e| SessionStoreError::Operation(format!("Redis SET failed: {}", e)))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, data: SessionData) -> SessionResult<String> {
        let id = generate_session_id()?;
        self.write(&id, &data).await?;
        debug!("Session created");
        Ok(id)
    }

    async fn load(&self, id: &str) -> SessionResult<Option<SessionData>> {
        let mut conn = self.client.clone();

        let payload = conn
            .get::<_, Option<String>>(self.build_key(id))
            .await
            .map_err(|e| SessionStoreError::Operation(format!("Redis GET failed: {}", e)))?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, id: &str, data: SessionData) -> SessionResult<()> {
        self.write(id, &data).await
    }

    async fn destroy(&self, id: &str) -> SessionResult<()> {
        let mut conn = self.client.clone();

        conn.del::<_, i32>(self.build_key(id))
            .await
            .map_err(|e| SessionStoreError::Operation(format!("Redis DEL failed: {}", e)))?;

        debug!("Session destroyed");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
