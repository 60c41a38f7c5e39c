#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tinylink::domain::store::{KeyValueStore, StoreError, StoreResult};
use tinylink::infrastructure::kv::MemoryStore;
use tinylink::routes::app_router;
use tinylink::state::AppState;
use tower::Layer;

pub const BASE_URL: &str = "http://localhost:8080";
pub const PEER_IP: &str = "9.9.9.9";

pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    create_test_state_with_limit(100)
}

pub fn create_test_state_with_limit(limit: u64) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), BASE_URL, limit);
    (state, store)
}

/// State whose backend fails every command.
pub fn create_failing_state() -> AppState {
    AppState::new(Arc::new(FailingStore), BASE_URL, 100)
}

/// Full application router with a fixed peer address.
pub fn test_app(state: AppState) -> Router {
    app_router(state).layer(MockConnectInfoLayer)
}

pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(refused())
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(refused())
    }

    async fn incr(&self, _key: &str) -> StoreResult<i64> {
        Err(refused())
    }

    async fn expire_at(&self, _key: &str, _at: DateTime<Utc>) -> StoreResult<bool> {
        Err(refused())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(refused())
    }
}

fn refused() -> StoreError {
    StoreError::Connection("connection refused".to_string())
}

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
        let addr = SocketAddr::new(PEER_IP.parse().unwrap(), 12345);
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
