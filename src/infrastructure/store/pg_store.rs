//! PostgreSQL-backed mapping store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::domain::{Mapping, MappingStore, PutOutcome, StoreError};

/// PostgreSQL store over the `urls` table.
///
/// The primary key on `slug` makes inserts atomic per slug. A conflicting
/// row is only replaced when it has expired.
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the database is unreachable and
    /// [`StoreError::Backend`] if migrations fail.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to database: {}", e)))?;
        info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to migrate: {}", e)))?;

        Ok(Self::new(Arc::new(pool)))
    }
}

#[async_trait]
impl MappingStore for PgStore {
    async fn put(&self, mapping: &Mapping) -> Result<PutOutcome, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (slug, target, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO UPDATE
                SET target = EXCLUDED.target,
                    created_at = EXCLUDED.created_at,
                    expires_at = EXCLUDED.expires_at
                WHERE urls.expires_at IS NOT NULL AND urls.expires_at <= NOW()
            "#,
        )
        .bind(&mapping.slug)
        .bind(&mapping.target)
        .bind(mapping.created_at)
        .bind(mapping.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 1 {
            Ok(PutOutcome::Stored)
        } else {
            Ok(PutOutcome::Occupied)
        }
    }

    async fn get(&self, slug: &str) -> Result<Option<String>, StoreError> {
        let target = sqlx::query_scalar::<_, String>(
            r#"
            SELECT target
            FROM urls
            WHERE slug = $1 AND (expires_at IS NULL OR expires_at > NOW())
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(target)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
