#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum::routing::{get, post};
use axum::Router;
use shortlink::api::handlers::{health_handler, redirect_handler, shorten_handler};
use shortlink::application::services::{AdmissionCounter, ShortenerService};
use shortlink::infrastructure::memory::{MemoryMappingStore, MemoryWindowStore};
use shortlink::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;

pub const TEST_BASE_URL: &str = "http://sho.rt";

/// Builds an [`AppState`] over the in-memory stores.
pub fn test_state(max_requests: u32, window: Duration) -> AppState {
    let shortener = Arc::new(ShortenerService::new(
        Arc::new(MemoryMappingStore::new()),
        Duration::from_secs(30 * 24 * 3600),
    ));
    let admission = Arc::new(AdmissionCounter::new(
        Arc::new(MemoryWindowStore::new()),
        max_requests,
        window,
    ));

    AppState::new(shortener, admission, TEST_BASE_URL.to_string(), false)
}

/// Router with all service routes and a fake peer address, since the test
/// transport has no real socket to read `ConnectInfo` from.
pub fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/s/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(MockConnectInfoLayer)
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
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
