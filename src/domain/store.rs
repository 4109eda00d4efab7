//! Store trait for slug → target persistence.

use crate::domain::Mapping;
use async_trait::async_trait;

/// Errors raised by store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Backend(e.to_string())
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Connection(e.to_string())
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Result of an insert-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The mapping was written.
    Stored,
    /// A live mapping already holds this slug; nothing was written.
    Occupied,
}

/// Key-value store holding every mapping.
///
/// Implementations must be safe to share across concurrent requests and
/// must make [`MappingStore::put`] atomic per slug: of two racing writers
/// for the same free slug, exactly one observes [`PutOutcome::Stored`].
///
/// # Implementations
///
/// - [`crate::infrastructure::store::MemoryStore`] - process-local `DashMap`
/// - [`crate::infrastructure::store::RedisStore`] - Redis keys `urls:{slug}`
/// - [`crate::infrastructure::store::PgStore`] - PostgreSQL table `urls`
/// - `MockMappingStore` under `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Stores the mapping unless its slug is already held by a live mapping.
    ///
    /// Expired mappings do not hold their slug and are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend write fails.
    async fn put(&self, mapping: &Mapping) -> Result<PutOutcome, StoreError>;

    /// Looks up the target for a slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(target))` if a live mapping exists
    /// - `Ok(None)` if absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend read fails.
    async fn get(&self, slug: &str) -> Result<Option<String>, StoreError>;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;
}
