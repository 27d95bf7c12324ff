//! In-process store implementations.
//!
//! Used when `MEMORY_STORE=true` (development without Redis) and by the
//! handler tests. A mutex per store stands in for the serialization the
//! real store provides; semantics match the Redis backend, including
//! extend-only TTL refresh and lazy expiry.

mod mapping_store;
mod window_store;

pub use mapping_store::MemoryMappingStore;
pub use window_store::MemoryWindowStore;
