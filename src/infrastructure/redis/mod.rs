//! Redis-backed store implementations.
//!
//! Requires Redis 7.0 or newer for `EXPIRE ... GT` (extend-only TTL
//! refresh).
//!
//! # Key layout
//!
//! | Key                       | Value    | TTL          |
//! |---------------------------|----------|--------------|
//! | `short:{slug}`            | long URL | 30 days, slid on access |
//! | `long:{long_url}`         | slug     | 30 days, slid on dedup hit |
//! | `ratelimit:{client_id}`   | sorted set of request markers | window length |

mod client;
mod mapping_store;
mod window_store;

pub use client::connect;
pub use mapping_store::RedisMappingStore;
pub use window_store::RedisWindowStore;

use crate::domain::stores::StoreError;

/// Forward mapping key prefix: `short:{slug}` -> long URL.
pub const FORWARD_PREFIX: &str = "short:";
/// Reverse (dedup) mapping key prefix: `long:{long_url}` -> slug.
pub const REVERSE_PREFIX: &str = "long:";
/// Rate-window key prefix: `ratelimit:{client_id}`.
pub const RATE_WINDOW_PREFIX: &str = "ratelimit:";

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}
