//! Redis implementation of the slug mapping store.
//!
//! Each trait method runs one Lua script, so the whole read-check-write
//! sequence of an allocation step executes inside the store without an
//! unguarded gap. Two clients racing for the same long URL or the same
//! candidate slug are serialized by Redis itself.

use super::{FORWARD_PREFIX, REVERSE_PREFIX};
use crate::domain::stores::{ClaimOutcome, MappingStore, StoreError};
use async_trait::async_trait;
use redis::{AsyncCommands, Script, aio::ConnectionManager};
use std::time::Duration;
use tracing::debug;

/// Dedup fast path. KEYS[1] = reverse key; ARGV[1] = ttl seconds,
/// ARGV[2] = forward prefix. Returns the existing slug or nil.
const DEDUP_SCRIPT: &str = r#"
local slug = redis.call('GET', KEYS[1])
if not slug then
  return false
end
redis.call('EXPIRE', KEYS[1], ARGV[1], 'GT')
redis.call('EXPIRE', ARGV[2] .. slug, ARGV[1], 'GT')
return slug
"#;

/// Claim attempt. KEYS[1] = forward key, KEYS[2] = reverse key;
/// ARGV[1] = long URL, ARGV[2] = slug, ARGV[3] = ttl seconds,
/// ARGV[4] = forward prefix.
///
/// Re-checks the reverse key first: a racer may have mapped the URL
/// between the caller's fast path and this attempt. Returns a
/// {status, slug} pair.
const CLAIM_SCRIPT: &str = r#"
local existing = redis.call('GET', KEYS[2])
if existing then
  redis.call('EXPIRE', KEYS[2], ARGV[3], 'GT')
  redis.call('EXPIRE', ARGV[4] .. existing, ARGV[3], 'GT')
  return {'exists', existing}
end
if redis.call('SET', KEYS[1], ARGV[1], 'NX', 'EX', ARGV[3]) then
  redis.call('SET', KEYS[2], ARGV[2], 'EX', ARGV[3])
  return {'created', ARGV[2]}
end
return {'taken', ''}
"#;

/// Resolve with sliding expiry. KEYS[1] = forward key; ARGV[1] = ttl
/// seconds. Returns the long URL or nil. The reverse key is untouched.
const RESOLVE_SCRIPT: &str = r#"
local url = redis.call('GET', KEYS[1])
if url then
  redis.call('EXPIRE', KEYS[1], ARGV[1], 'GT')
end
return url
"#;

/// Slug mapping store over a shared Redis connection.
pub struct RedisMappingStore {
    conn: ConnectionManager,
    dedup: Script,
    claim: Script,
    resolve: Script,
}

impl RedisMappingStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn,
            dedup: Script::new(DEDUP_SCRIPT),
            claim: Script::new(CLAIM_SCRIPT),
            resolve: Script::new(RESOLVE_SCRIPT),
        }
    }

    fn forward_key(slug: &str) -> String {
        format!("{}{}", FORWARD_PREFIX, slug)
    }

    fn reverse_key(long_url: &str) -> String {
        format!("{}{}", REVERSE_PREFIX, long_url)
    }
}

#[async_trait]
impl MappingStore for RedisMappingStore {
    async fn find_and_refresh(
        &self,
        long_url: &str,
        ttl: Duration,
    ) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();

        let slug: Option<String> = self
            .dedup
            .key(Self::reverse_key(long_url))
            .arg(ttl.as_secs())
            .arg(FORWARD_PREFIX)
            .invoke_async(&mut conn)
            .await?;

        if slug.is_some() {
            debug!("Dedup hit, TTL extended for both mapping keys");
        }

        Ok(slug)
    }

    async fn try_claim(
        &self,
        slug: &str,
        long_url: &str,
        ttl: Duration,
    ) -> Result<ClaimOutcome, StoreError> {
        let mut conn = self.conn.clone();

        let (status, value): (String, String) = self
            .claim
            .key(Self::forward_key(slug))
            .key(Self::reverse_key(long_url))
            .arg(long_url)
            .arg(slug)
            .arg(ttl.as_secs())
            .arg(FORWARD_PREFIX)
            .invoke_async(&mut conn)
            .await?;

        match status.as_str() {
            "created" => Ok(ClaimOutcome::Created),
            "exists" => Ok(ClaimOutcome::Existing(value)),
            _ => {
                debug!(slug, "Candidate slug already claimed");
                Ok(ClaimOutcome::Taken)
            }
        }
    }

    async fn resolve_and_refresh(
        &self,
        slug: &str,
        ttl: Duration,
    ) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();

        let url: Option<String> = self
            .resolve
            .key(Self::forward_key(slug))
            .arg(ttl.as_secs())
            .invoke_async(&mut conn)
            .await?;

        Ok(url)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
