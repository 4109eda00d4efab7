//! Redis-backed mapping store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::{Mapping, MappingStore, PutOutcome, StoreError};

/// Redis store keeping each mapping as a plain string key `urls:{slug}`.
///
/// Writes use `SET NX`, so an existing slug is never overwritten. Mappings
/// with an expiry are written with `EXAT` and Redis drops them on its own.
pub struct RedisStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            conn: manager,
            key_prefix: "urls:".to_string(),
        })
    }

    fn build_key(&self, slug: &str) -> String {
        format!("{}{}", self.key_prefix, slug)
    }
}

#[async_trait]
impl MappingStore for RedisStore {
    async fn put(&self, mapping: &Mapping) -> Result<PutOutcome, StoreError> {
        let key = self.build_key(&mapping.slug);
        let mut conn = self.conn.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(&mapping.target).arg("NX");
        if let Some(expires_at) = mapping.expires_at {
            cmd.arg("EXAT").arg(expires_at.timestamp());
        }

        // SET NX replies OK when written and nil when the key exists.
        let reply: Option<String> = cmd.query_async(&mut conn).await?;

        if reply.is_some() {
            debug!("Redis SET {}", key);
            Ok(PutOutcome::Stored)
        } else {
            debug!("Redis SET NX refused for {}", key);
            Ok(PutOutcome::Occupied)
        }
    }

    async fn get(&self, slug: &str) -> Result<Option<String>, StoreError> {
        let key = self.build_key(slug);
        let mut conn = self.conn.clone();

        let target = conn.get::<_, Option<String>>(&key).await?;
        Ok(target)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
