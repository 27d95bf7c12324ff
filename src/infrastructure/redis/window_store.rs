//! Redis implementation of the rate window store.
//!
//! A sorted set per client holds one member per accepted request, scored by
//! nanosecond timestamp. Prune and count are individual commands; the
//! append is a MULTI/EXEC pipeline so the marker and the key TTL land
//! together. Distinct clients never share a key, so cross-client races do
//! not exist.

use super::RATE_WINDOW_PREFIX;
use crate::domain::stores::{StoreError, WindowStore};
use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use std::time::Duration;

/// Rate window store over a shared Redis connection.
pub struct RedisWindowStore {
    conn: ConnectionManager,
}

impl RedisWindowStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn window_key(client_id: &str) -> String {
        format!("{}{}", RATE_WINDOW_PREFIX, client_id)
    }
}

#[async_trait]
impl WindowStore for RedisWindowStore {
    async fn prune(&self, client_id: &str, cutoff_nanos: i64) -> Result<(), StoreError> {
        let key = Self::window_key(client_id);
        let mut conn = self.conn.clone();

        let _removed: i64 = conn.zrembyscore(&key, "-inf", cutoff_nanos).await?;

        Ok(())
    }

    async fn count(&self, client_id: &str) -> Result<u64, StoreError> {
        let key = Self::window_key(client_id);
        let mut conn = self.conn.clone();

        let count: u64 = conn.zcard(&key).await?;

        Ok(count)
    }

    async fn append(
        &self,
        client_id: &str,
        score_nanos: i64,
        member: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let key = Self::window_key(client_id);
        let mut conn = self.conn.clone();

        redis::pipe()
            .atomic()
            .zadd(&key, member, score_nanos)
            .ignore()
            .expire(&key, ttl.as_secs() as i64)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;

        Ok(())
    }
}
