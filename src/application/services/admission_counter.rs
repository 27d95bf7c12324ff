//! Sliding-window admission control.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::allocation::AdmissionDecision;
use crate::domain::stores::WindowStore;
use crate::error::AppError;
use rand::Rng;
use tracing::debug;

/// Exact sliding-window counter over a per-client ordered set.
///
/// Counts the true number of accepted requests in the trailing window at
/// the moment of the check, avoiding the boundary-doubling artifact of
/// fixed buckets. Storage is O(window size) per client; the key expires
/// after a full idle window.
///
/// Store failures are surfaced as [`AppError::StoreUnavailable`] and deny
/// the request: admission control fails closed so a degraded store cannot
/// be used to bypass the quota.
pub struct AdmissionCounter {
    store: Arc<dyn WindowStore>,
    max_requests: u32,
    window: Duration,
}

impl AdmissionCounter {
    pub fn new(store: Arc<dyn WindowStore>, max_requests: u32, window: Duration) -> Self {
        Self {
            store,
            max_requests,
            window,
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Checks the client's quota and consumes one unit when allowed.
    ///
    /// Sequence per check: prune markers older than the window, count the
    /// remainder, deny at the limit without recording anything (rejected
    /// attempts never consume quota), otherwise record a fresh marker and
    /// reset the key TTL to the window length.
    pub async fn check_and_consume(&self, client_id: &str) -> Result<AdmissionDecision, AppError> {
        self.check_and_consume_at(client_id, now_nanos()).await
    }

    /// Same as [`Self::check_and_consume`] with an explicit clock reading.
    pub async fn check_and_consume_at(
        &self,
        client_id: &str,
        now_nanos: i64,
    ) -> Result<AdmissionDecision, AppError> {
        let cutoff = now_nanos - self.window.as_nanos() as i64;

        self.store.prune(client_id, cutoff).await?;
        let count = self.store.count(client_id).await?;

        if count >= u64::from(self.max_requests) {
            debug!(client_id, count, "Admission denied, window quota exhausted");
            return Ok(AdmissionDecision {
                allowed: false,
                current_count: count,
            });
        }

        // Random suffix keeps members distinct even when two requests land
        // on the same nanosecond tick.
        let member = format!("{}-{:08x}", now_nanos, rand::rng().random::<u32>());
        self.store
            .append(client_id, now_nanos, &member, self.window)
            .await?;

        Ok(AdmissionDecision {
            allowed: true,
            current_count: count + 1,
        })
    }
}

fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_nanos() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stores::{MockWindowStore, StoreError};
    use crate::infrastructure::memory::MemoryWindowStore;

    const WINDOW: Duration = Duration::from_secs(120);
    const WINDOW_NANOS: i64 = 120 * 1_000_000_000;

    #[tokio::test]
    async fn test_under_quota_appends_and_counts() {
        let mut store = MockWindowStore::new();

        store
            .expect_prune()
            .withf(|client, cutoff| client == "10.0.0.1" && *cutoff == 1_000_000 - WINDOW_NANOS)
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_count().times(1).returning(|_| Ok(4));
        store
            .expect_append()
            .withf(|client, score, member, ttl| {
                client == "10.0.0.1"
                    && *score == 1_000_000
                    && member.starts_with("1000000-")
                    && *ttl == WINDOW
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let counter = AdmissionCounter::new(Arc::new(store), 15, WINDOW);
        let decision = counter
            .check_and_consume_at("10.0.0.1", 1_000_000)
            .await
            .unwrap();

        assert!(decision.allowed);
        assert_eq!(decision.current_count, 5);
    }

    #[tokio::test]
    async fn test_at_quota_denies_without_recording() {
        let mut store = MockWindowStore::new();

        store.expect_prune().times(1).returning(|_, _| Ok(()));
        store.expect_count().times(1).returning(|_| Ok(15));
        store.expect_append().times(0);

        let counter = AdmissionCounter::new(Arc::new(store), 15, WINDOW);
        let decision = counter
            .check_and_consume_at("10.0.0.1", 1_000_000)
            .await
            .unwrap();

        assert!(!decision.allowed);
        assert_eq!(decision.current_count, 15);
        assert_eq!(decision.remaining(15), 0);
    }

    #[tokio::test]
    async fn test_store_error_fails_closed() {
        let mut store = MockWindowStore::new();

        store
            .expect_prune()
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("timeout".to_string())));

        let counter = AdmissionCounter::new(Arc::new(store), 15, WINDOW);
        let err = counter
            .check_and_consume_at("10.0.0.1", 1_000_000)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }

    // Window exactness over the real in-memory store: 15 allowed, the 16th
    // denied, denial consumes nothing, and the quota frees up once the
    // first request ages past the window.
    #[tokio::test]
    async fn test_window_exactness() {
        let counter = AdmissionCounter::new(Arc::new(MemoryWindowStore::new()), 15, WINDOW);
        let base: i64 = 1_700_000_000 * 1_000_000_000;

        for i in 0..15i64 {
            let decision = counter
                .check_and_consume_at("10.0.0.1", base + i * 1_000)
                .await
                .unwrap();
            assert!(decision.allowed, "request {} should be allowed", i + 1);
            assert_eq!(decision.current_count, i as u64 + 1);
        }

        let denied = counter
            .check_and_consume_at("10.0.0.1", base + 20_000)
            .await
            .unwrap();
        assert!(!denied.allowed);
        assert_eq!(denied.current_count, 15);

        // Rejection did not consume quota.
        let denied_again = counter
            .check_and_consume_at("10.0.0.1", base + 21_000)
            .await
            .unwrap();
        assert_eq!(denied_again.current_count, 15);

        // Just past the window from the first request, one slot frees up.
        let after_window = counter
            .check_and_consume_at("10.0.0.1", base + WINDOW_NANOS + 1)
            .await
            .unwrap();
        assert!(after_window.allowed);
        assert_eq!(after_window.current_count, 15);
    }

    #[tokio::test]
    async fn test_clients_do_not_share_windows() {
        let counter = AdmissionCounter::new(Arc::new(MemoryWindowStore::new()), 1, WINDOW);
        let base: i64 = 1_700_000_000 * 1_000_000_000;

        assert!(counter.check_and_consume_at("a", base).await.unwrap().allowed);
        assert!(!counter.check_and_consume_at("a", base + 1).await.unwrap().allowed);
        assert!(counter.check_and_consume_at("b", base + 2).await.unwrap().allowed);
    }
}
