//! Mapping creation and resolution service.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::{Mapping, MappingStore, PutOutcome};
use crate::error::AppError;
use crate::utils::slug::{SLUG_LENGTH, generate_slug, is_valid_slug};
use crate::utils::url_validator::validate_target;

/// Default number of slug draws before a create gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Service for creating and resolving short links.
///
/// Owns the validation policy and the collision policy: slugs are written
/// with insert-if-absent and a fresh slug is drawn when one is taken, so an
/// existing mapping is never overwritten.
pub struct MappingService {
    store: Arc<dyn MappingStore>,
    base_url: String,
    ttl: Option<Duration>,
    max_attempts: usize,
}

impl MappingService {
    /// Creates a service over `store` that builds short URLs under `base_url`.
    pub fn new(store: Arc<dyn MappingStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            ttl: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Gives every new mapping a lifetime.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Overrides the number of slug draws per create. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Validates `long_url` and stores it under a fresh slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the URL is blank.
    /// Returns [`AppError::Unprocessable`] if it is not an absolute URL, contains
    /// control characters or uses a blocked scheme.
    /// Returns [`AppError::Internal`] if every slug draw collided or the store fails.
    pub async fn create_mapping(&self, long_url: &str) -> Result<Mapping, AppError> {
        if long_url.trim().is_empty() {
            return Err(AppError::bad_request(
                "Spell, Hex, requires a target",
                json!({ "field": "url" }),
            ));
        }

        let target = validate_target(long_url).map_err(|e| {
            warn!("Rejected target: {}", e);
            AppError::unprocessable(
                "The hex fizzles on non-urls",
                json!({ "url": long_url, "reason": e.to_string() }),
            )
        })?;

        for attempt in 1..=self.max_attempts {
            let slug = generate_slug().map_err(|e| {
                AppError::internal(
                    "Failed to generate slug",
                    json!({ "reason": e.to_string() }),
                )
            })?;

            let mapping = Mapping::new(slug, target.to_string(), self.ttl);

            match self.store.put(&mapping).await? {
                PutOutcome::Stored => {
                    info!(slug = %mapping.slug, target = %mapping.target, "Created mapping");
                    return Ok(mapping);
                }
                PutOutcome::Occupied => {
                    warn!(
                        slug = %mapping.slug,
                        attempt,
                        "Slug collision, drawing another"
                    );
                }
            }
        }

        Err(AppError::internal(
            "Failed to generate unique slug",
            json!({ "reason": "Too many collisions", "attempts": self.max_attempts }),
        ))
    }

    /// Looks up the target URL for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if the slug length is wrong; the store
    /// is not consulted in that case.
    /// Returns [`AppError::NotFound`] if no live mapping exists.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn resolve(&self, slug: &str) -> Result<String, AppError> {
        if !is_valid_slug(slug) {
            warn!(slug, "Rejected slug with wrong length");
            return Err(AppError::bad_request(
                "You ain't gotta do all that. Hexes that big don't exist!",
                json!({ "slug": slug, "expected_length": SLUG_LENGTH }),
            ));
        }

        match self.store.get(slug).await? {
            Some(target) => {
                info!(slug, "Found mapping");
                Ok(target)
            }
            None => {
                warn!(slug, "Mapping not found");
                Err(AppError::not_found(
                    "Your URL is in another castle",
                    json!({ "slug": slug }),
                ))
            }
        }
    }

    /// Constructs the public short URL for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), slug)
    }

    /// Checks that the underlying store is reachable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.store.ping().await?;
        Ok(())
    }

    /// Name of the store backend in use.
    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockMappingStore, StoreError};
    use axum::http::StatusCode;

    fn service(store: MockMappingStore) -> MappingService {
        MappingService::new(Arc::new(store), "https://hex.example")
    }

    #[tokio::test]
    async fn test_create_mapping_success() {
        let mut store = MockMappingStore::new();
        store
            .expect_put()
            .withf(|m| m.target == "https://example.com" && m.slug.len() == SLUG_LENGTH)
            .times(1)
            .returning(|_| Ok(PutOutcome::Stored));

        let mapping = service(store)
            .create_mapping("https://example.com")
            .await
            .unwrap();

        assert_eq!(mapping.target, "https://example.com");
        assert_eq!(mapping.slug.len(), SLUG_LENGTH);
        assert!(mapping.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_create_mapping_trims_target() {
        let mut store = MockMappingStore::new();
        store
            .expect_put()
            .withf(|m| m.target == "https://example.com/path")
            .times(1)
            .returning(|_| Ok(PutOutcome::Stored));

        let mapping = service(store)
            .create_mapping("  https://example.com/path  ")
            .await
            .unwrap();

        assert_eq!(mapping.target, "https://example.com/path");
    }

    #[tokio::test]
    async fn test_create_mapping_with_ttl_sets_expiry() {
        let mut store = MockMappingStore::new();
        store
            .expect_put()
            .withf(|m| m.expires_at == Some(m.created_at + Duration::seconds(60)))
            .times(1)
            .returning(|_| Ok(PutOutcome::Stored));

        let mapping = service(store)
            .with_ttl(Some(Duration::seconds(60)))
            .create_mapping("https://example.com")
            .await
            .unwrap();

        assert!(mapping.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_create_mapping_blank_is_bad_request() {
        let mut store = MockMappingStore::new();
        store.expect_put().never();

        let err = service(store).create_mapping("   ").await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_mapping_invalid_url_is_unprocessable() {
        let mut store = MockMappingStore::new();
        store.expect_put().never();

        let err = service(store).create_mapping("not a url").await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("non-urls"));
    }

    #[tokio::test]
    async fn test_create_mapping_rejects_javascript_scheme() {
        let mut store = MockMappingStore::new();
        store.expect_put().never();

        let err = service(store)
            .create_mapping("javascript:alert(1)")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_mapping_rejects_embedded_newline() {
        let mut store = MockMappingStore::new();
        store.expect_put().never();

        let err = service(store)
            .create_mapping("https://exa\nmple.com/")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_mapping_accepts_non_http_scheme() {
        let mut store = MockMappingStore::new();
        store
            .expect_put()
            .withf(|m| m.target == "ftp://example.com/file")
            .times(1)
            .returning(|_| Ok(PutOutcome::Stored));

        let mapping = service(store)
            .create_mapping("ftp://example.com/file")
            .await
            .unwrap();

        assert_eq!(mapping.target, "ftp://example.com/file");
    }

    #[tokio::test]
    async fn test_create_mapping_with_huge_ttl_does_not_panic() {
        let mut store = MockMappingStore::new();
        store
            .expect_put()
            .withf(|m| m.expires_at.is_none())
            .times(1)
            .returning(|_| Ok(PutOutcome::Stored));

        let mapping = service(store)
            .with_ttl(Some(Duration::seconds(9_000_000_000_000)))
            .create_mapping("https://example.com")
            .await
            .unwrap();

        assert!(!mapping.is_expired());
    }

    #[tokio::test]
    async fn test_create_mapping_retries_on_collision() {
        let mut store = MockMappingStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_put()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(PutOutcome::Occupied));
        store
            .expect_put()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(PutOutcome::Stored));

        let result = service(store).create_mapping("https://example.com").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_mapping_gives_up_after_max_attempts() {
        let mut store = MockMappingStore::new();
        store
            .expect_put()
            .times(3)
            .returning(|_| Ok(PutOutcome::Occupied));

        let err = service(store)
            .with_max_attempts(3)
            .create_mapping("https://example.com")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("unique slug"));
    }

    #[tokio::test]
    async fn test_create_mapping_store_failure_is_internal() {
        let mut store = MockMappingStore::new();
        store
            .expect_put()
            .times(1)
            .returning(|_| Err(StoreError::Connection("refused".to_string())));

        let err = service(store)
            .create_mapping("https://example.com")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut store = MockMappingStore::new();
        store
            .expect_get()
            .withf(|slug| slug == "abcd")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let target = service(store).resolve("abcd").await.unwrap();

        assert_eq!(target, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut store = MockMappingStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));

        let err = service(store).resolve("abcd").await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resolve_wrong_length_skips_store() {
        let mut store = MockMappingStore::new();
        store.expect_get().never();
        let service = service(store);

        for slug in ["", "abc", "abcde", "this-is-way-too-long"] {
            let err = service.resolve(slug).await.unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "slug {slug:?}");
        }
    }

    #[tokio::test]
    async fn test_resolve_store_failure_is_internal() {
        let mut store = MockMappingStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Backend("boom".to_string())));

        let err = service(store).resolve("abcd").await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_short_url() {
        let store = MockMappingStore::new();
        assert_eq!(service(store).short_url("abcd"), "https://hex.example/abcd");

        let store = MockMappingStore::new();
        let service = MappingService::new(Arc::new(store), "http://localhost:8080/");
        assert_eq!(service.short_url("x_-9"), "http://localhost:8080/x_-9");
    }

    #[test]
    fn test_max_attempts_floor() {
        let store = MockMappingStore::new();
        let service = service(store).with_max_attempts(0);
        assert_eq!(service.max_attempts, 1);
    }
}
