//! HTTP server initialization and runtime setup.
//!
//! Wires the store backend, services, router, and Axum server lifecycle.

use crate::application::services::{AdmissionCounter, ShortenerService};
use crate::config::Config;
use crate::domain::stores::{MappingStore, WindowStore};
use crate::infrastructure::memory::{MemoryMappingStore, MemoryWindowStore};
use crate::infrastructure::redis::{self, RedisMappingStore, RedisWindowStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Store backend (Redis with a PING probe, or the in-process store)
/// - Shortener service and admission counter
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if the store connection, server bind, or server
/// runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let (mapping_store, window_store): (Arc<dyn MappingStore>, Arc<dyn WindowStore>) =
        if config.use_memory_store {
            tracing::info!("Using in-process store (MEMORY_STORE=true)");
            (
                Arc::new(MemoryMappingStore::new()),
                Arc::new(MemoryWindowStore::new()),
            )
        } else {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("Redis is not configured")?;
            let conn = redis::connect(redis_url).await?;
            (
                Arc::new(RedisMappingStore::new(conn.clone())),
                Arc::new(RedisWindowStore::new(conn)),
            )
        };

    let shortener = Arc::new(ShortenerService::new(
        mapping_store,
        Duration::from_secs(config.url_ttl_days * SECONDS_PER_DAY),
    ));
    let admission = Arc::new(AdmissionCounter::new(
        window_store,
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    ));
    tracing::info!(
        max_requests = config.rate_limit_max_requests,
        window_secs = config.rate_limit_window_secs,
        "Admission counter ready"
    );

    let state = AppState::new(
        shortener,
        admission,
        config.base_url.clone(),
        config.behind_proxy,
    );

    let app = app_router(state, &config.allowed_origins);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
