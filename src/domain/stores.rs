//! Store capability traits for the slug mapping and the rate window.
//!
//! Both traits are the only seams between the protocol logic in
//! [`crate::application`] and the shared key-value store. Each method is a
//! single indivisible step against the store: implementations must make the
//! multi-key operations (dedup refresh, claim, resolve-and-refresh) atomic,
//! so no application-level lock is ever needed.
//!
//! # Implementations
//!
//! - [`crate::infrastructure::redis::RedisMappingStore`] /
//!   [`crate::infrastructure::redis::RedisWindowStore`] - production,
//!   Lua-scripted atomicity
//! - [`crate::infrastructure::memory::MemoryMappingStore`] /
//!   [`crate::infrastructure::memory::MemoryWindowStore`] - development and
//!   tests, a mutex stands in for the store's serialization
//! - Test mocks available with `cfg(test)`

use async_trait::async_trait;
use std::time::Duration;

/// Transport or transaction failure from the underlying store.
///
/// Never silently retried: the only intentional retry in the system is the
/// random-slug collision loop, and that reacts to [`ClaimOutcome::Taken`],
/// not to this error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result of one atomic claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The candidate slug was free; both directional entries now exist.
    Created,
    /// The candidate slug belongs to a different URL.
    Taken,
    /// A concurrent caller mapped this URL first; its slug is returned and
    /// both entries had their TTL extended.
    Existing(String),
}

/// Bidirectional slug <-> long URL mapping with TTL-based expiry.
///
/// Keys follow the interoperable layout `"short:" + slug` (forward) and
/// `"long:" + long_url` (reverse). TTL refreshes are extend-only: a refresh
/// racing with a concurrent one never shortens a key's remaining lifetime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Dedup fast path: atomically looks up the reverse entry for
    /// `long_url` and, when present, extends the TTL of both directional
    /// entries before returning the existing slug.
    async fn find_and_refresh(
        &self,
        long_url: &str,
        ttl: Duration,
    ) -> Result<Option<String>, StoreError>;

    /// Atomically attempts to claim `slug` for `long_url`.
    ///
    /// In one indivisible step: re-checks the reverse entry (a racer may
    /// have mapped the URL since the fast path), then creates the forward
    /// entry only if absent, then the reverse entry, all with `ttl`.
    async fn try_claim(
        &self,
        slug: &str,
        long_url: &str,
        ttl: Duration,
    ) -> Result<ClaimOutcome, StoreError>;

    /// Resolves `slug` to its long URL, sliding the forward entry's TTL on
    /// a hit. The reverse entry is never touched by resolution.
    async fn resolve_and_refresh(
        &self,
        slug: &str,
        ttl: Duration,
    ) -> Result<Option<String>, StoreError>;

    /// Whether the store answers a round-trip probe.
    async fn health_check(&self) -> bool;
}

/// Per-client ordered set of request markers for the sliding window.
///
/// Keyed as `"ratelimit:" + client_id`. Scores are nanosecond timestamps;
/// members carry a random suffix so two requests in the same tick remain
/// distinct entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WindowStore: Send + Sync {
    /// Removes every marker with score at or below `cutoff_nanos`.
    async fn prune(&self, client_id: &str, cutoff_nanos: i64) -> Result<(), StoreError>;

    /// Counts markers currently recorded for the client.
    async fn count(&self, client_id: &str) -> Result<u64, StoreError>;

    /// Records a new marker and resets the key's TTL to the window length.
    async fn append(
        &self,
        client_id: &str,
        score_nanos: i64,
        member: &str,
        ttl: Duration,
    ) -> Result<(), StoreError>;
}
