//! In-memory rate window store.

use crate::domain::stores::{StoreError, WindowStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    /// (score, member) pairs; members are unique even on score ties.
    markers: Vec<(i64, String)>,
    expires_at: Instant,
}

/// Mutex-guarded per-client windows with lazy key expiry.
#[derive(Debug, Default)]
pub struct MemoryWindowStore {
    windows: Mutex<HashMap<String, Window>>,
}

impl MemoryWindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Window>> {
        self.windows.lock().expect("window store mutex poisoned")
    }

    fn drop_expired(windows: &mut HashMap<String, Window>, now: Instant) {
        windows.retain(|_, w| w.expires_at > now);
    }
}

#[async_trait]
impl WindowStore for MemoryWindowStore {
    async fn prune(&self, client_id: &str, cutoff_nanos: i64) -> Result<(), StoreError> {
        let mut windows = self.lock();
        Self::drop_expired(&mut windows, Instant::now());

        if let Some(window) = windows.get_mut(client_id) {
            window.markers.retain(|(score, _)| *score > cutoff_nanos);
        }

        Ok(())
    }

    async fn count(&self, client_id: &str) -> Result<u64, StoreError> {
        let mut windows = self.lock();
        Self::drop_expired(&mut windows, Instant::now());

        Ok(windows.get(client_id).map_or(0, |w| w.markers.len() as u64))
    }

    async fn append(
        &self,
        client_id: &str,
        score_nanos: i64,
        member: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut windows = self.lock();
        Self::drop_expired(&mut windows, now);

        let window = windows.entry(client_id.to_string()).or_insert(Window {
            markers: Vec::new(),
            expires_at: now + ttl,
        });
        window.markers.push((score_nanos, member.to_string()));
        window.expires_at = now + ttl;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(120);

    #[tokio::test]
    async fn test_append_and_count() {
        let store = MemoryWindowStore::new();

        store.append("10.0.0.1", 100, "100-a", TTL).await.unwrap();
        store.append("10.0.0.1", 200, "200-b", TTL).await.unwrap();

        assert_eq!(store.count("10.0.0.1").await.unwrap(), 2);
        assert_eq!(store.count("10.0.0.2").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_prune_removes_at_and_below_cutoff() {
        let store = MemoryWindowStore::new();

        store.append("c", 100, "100-a", TTL).await.unwrap();
        store.append("c", 200, "200-b", TTL).await.unwrap();
        store.append("c", 300, "300-c", TTL).await.unwrap();

        store.prune("c", 200).await.unwrap();

        assert_eq!(store.count("c").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_same_score_distinct_members_both_counted() {
        let store = MemoryWindowStore::new();

        store.append("c", 100, "100-a", TTL).await.unwrap();
        store.append("c", 100, "100-b", TTL).await.unwrap();

        assert_eq!(store.count("c").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_idle_window_expires() {
        let store = MemoryWindowStore::new();

        store.append("c", 100, "100-a", Duration::ZERO).await.unwrap();

        assert_eq!(store.count("c").await.unwrap(), 0);
    }
}
