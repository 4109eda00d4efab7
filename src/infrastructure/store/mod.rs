//! Mapping store backends.
//!
//! - [`MemoryStore`] - process-local, the default
//! - [`RedisStore`] - Redis string keys under `urls:`
//! - [`PgStore`] - PostgreSQL table `urls`
//!
//! [`connect`] picks the backend named in the configuration.

mod memory_store;
mod pg_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use pg_store::PgStore;
pub use redis_store::RedisStore;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, StoreBackend};
use crate::domain::MappingStore;

/// Opens the store selected by [`Config::store_backend`].
///
/// # Errors
///
/// Returns an error if the backend's connection settings are missing or
/// the backend cannot be reached.
pub async fn connect(config: &Config) -> Result<Arc<dyn MappingStore>> {
    let store: Arc<dyn MappingStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL or REDIS_HOST must be set for the redis backend")?;
            Arc::new(
                RedisStore::connect(redis_url)
                    .await
                    .context("Failed to open Redis store")?,
            )
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL or DB_* variables must be set for the postgres backend")?;
            Arc::new(
                PgStore::connect(
                    database_url,
                    config.db_max_connections,
                    Duration::from_secs(config.db_connect_timeout),
                )
                .await
                .context("Failed to open PostgreSQL store")?,
            )
        }
    };

    tracing::info!("Mapping store ready ({})", store.backend());
    Ok(store)
}
