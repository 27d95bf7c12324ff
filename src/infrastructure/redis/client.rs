//! Redis connection setup.

use crate::domain::stores::StoreError;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::info;

/// Connects to Redis and validates the connection with a PING.
///
/// The returned [`ConnectionManager`] multiplexes one connection and
/// reconnects transparently; clones are cheap and every store operation
/// works on its own clone.
///
/// # Errors
///
/// Returns [`StoreError::Unavailable`] if the URL is invalid, the
/// connection cannot be established, or the PING health check fails.
pub async fn connect(redis_url: &str) -> Result<ConnectionManager, StoreError> {
    info!("Connecting to Redis");

    let client = Client::open(redis_url)
        .map_err(|e| StoreError::Unavailable(format!("Failed to create Redis client: {}", e)))?;

    let manager = ConnectionManager::new(client)
        .await
        .map_err(|e| StoreError::Unavailable(format!("Failed to connect to Redis: {}", e)))?;

    let mut probe = manager.clone();
    probe
        .ping::<()>()
        .await
        .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {}", e)))?;

    info!("✓ Connected to Redis");

    Ok(manager)
}
