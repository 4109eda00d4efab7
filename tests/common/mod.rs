#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::Duration;
use hexlinks::api::middleware::rate_limit::RateLimitSettings;
use hexlinks::application::MappingService;
use hexlinks::domain::{Mapping, MappingStore, PutOutcome, StoreError};
use hexlinks::infrastructure::store::MemoryStore;
use hexlinks::routes::app_router;
use hexlinks::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const BASE_URL: &str = "http://hex.test";

/// Store whose every operation fails, for exercising 5xx paths.
pub struct FailingStore;

#[async_trait]
impl MappingStore for FailingStore {
    async fn put(&self, _mapping: &Mapping) -> Result<PutOutcome, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn get(&self, _slug: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

pub fn create_test_state(store: Arc<dyn MappingStore>) -> AppState {
    let service = MappingService::new(store, BASE_URL);
    AppState::new(Arc::new(service))
}

/// Test server over a fresh in-memory store whose new mappings expire after `ttl`.
pub fn memory_server_with_ttl(ttl: Duration) -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = MappingService::new(store.clone(), BASE_URL).with_ttl(Some(ttl));
    let state = AppState::new(Arc::new(service));
    let server = TestServer::new(app_router(state, None)).unwrap();

    (server, store)
}

/// Test server over a fresh in-memory store, without rate limiting.
pub fn memory_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = create_test_state(store.clone());
    let server = TestServer::new(app_router(state, None)).unwrap();

    (server, store)
}

/// Test server whose store always fails.
pub fn failing_server() -> TestServer {
    let state = create_test_state(Arc::new(FailingStore));
    TestServer::new(app_router(state, None)).unwrap()
}

/// Test server with rate limiting on `POST /new` and a fixed peer address.
pub fn rate_limited_server(settings: RateLimitSettings) -> TestServer {
    let state = create_test_state(Arc::new(MemoryStore::new()));
    let app = app_router(state, Some(settings)).layer(MockConnectInfoLayer);

    TestServer::new(app).unwrap()
}

/// Inserts a mapping directly into the store.
pub async fn seed_mapping(store: &MemoryStore, slug: &str, target: &str) {
    let outcome = store
        .put(&Mapping::new(slug.to_string(), target.to_string(), None))
        .await
        .unwrap();
    assert_eq!(outcome, PutOutcome::Stored);
}

/// Supplies `ConnectInfo` the way `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
