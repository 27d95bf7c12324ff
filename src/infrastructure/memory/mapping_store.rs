//! In-memory slug mapping store.

use crate::domain::stores::{ClaimOutcome, MappingStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }

    /// Extend-only refresh, mirroring `EXPIRE ... GT`.
    fn refresh_gt(&mut self, now: Instant, ttl: Duration) {
        let candidate = now + ttl;
        if candidate > self.expires_at {
            self.expires_at = candidate;
        }
    }
}

#[derive(Debug, Default)]
struct Maps {
    /// slug -> long URL
    forward: HashMap<String, Entry>,
    /// long URL -> slug
    reverse: HashMap<String, Entry>,
}

impl Maps {
    fn drop_expired(&mut self, now: Instant) {
        self.forward.retain(|_, e| !e.is_expired(now));
        self.reverse.retain(|_, e| !e.is_expired(now));
    }
}

/// Mutex-guarded bidirectional mapping with lazy expiry.
#[derive(Debug, Default)]
pub struct MemoryMappingStore {
    maps: Mutex<Maps>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Maps> {
        self.maps.lock().expect("mapping store mutex poisoned")
    }

    /// Remaining TTL of the forward entry for `slug`, if present.
    #[cfg(test)]
    fn forward_expiry(&self, slug: &str) -> Option<Instant> {
        self.lock().forward.get(slug).map(|e| e.expires_at)
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    async fn find_and_refresh(
        &self,
        long_url: &str,
        ttl: Duration,
    ) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut maps = self.lock();
        maps.drop_expired(now);

        let Some(reverse) = maps.reverse.get_mut(long_url) else {
            return Ok(None);
        };
        reverse.refresh_gt(now, ttl);
        let slug = reverse.value.clone();

        if let Some(forward) = maps.forward.get_mut(&slug) {
            forward.refresh_gt(now, ttl);
        }

        Ok(Some(slug))
    }

    async fn try_claim(
        &self,
        slug: &str,
        long_url: &str,
        ttl: Duration,
    ) -> Result<ClaimOutcome, StoreError> {
        let now = Instant::now();
        let mut maps = self.lock();
        maps.drop_expired(now);

        if let Some(reverse) = maps.reverse.get_mut(long_url) {
            reverse.refresh_gt(now, ttl);
            let existing = reverse.value.clone();
            if let Some(forward) = maps.forward.get_mut(&existing) {
                forward.refresh_gt(now, ttl);
            }
            return Ok(ClaimOutcome::Existing(existing));
        }

        if maps.forward.contains_key(slug) {
            return Ok(ClaimOutcome::Taken);
        }

        let expires_at = now + ttl;
        maps.forward.insert(
            slug.to_string(),
            Entry {
                value: long_url.to_string(),
                expires_at,
            },
        );
        maps.reverse.insert(
            long_url.to_string(),
            Entry {
                value: slug.to_string(),
                expires_at,
            },
        );

        Ok(ClaimOutcome::Created)
    }

    async fn resolve_and_refresh(
        &self,
        slug: &str,
        ttl: Duration,
    ) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut maps = self.lock();
        maps.drop_expired(now);

        let Some(forward) = maps.forward.get_mut(slug) else {
            return Ok(None);
        };
        forward.refresh_gt(now, ttl);

        Ok(Some(forward.value.clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
