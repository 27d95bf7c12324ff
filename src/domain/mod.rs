//! Core domain types and store capability traits.
//!
//! The domain layer defines *what* the system coordinates through the shared
//! key-value store, without committing to a backend. Concrete Redis and
//! in-memory implementations live in [`crate::infrastructure`].

pub mod allocation;
pub mod stores;

pub use allocation::{AdmissionDecision, Allocation, AllocationKind};
pub use stores::{ClaimOutcome, MappingStore, StoreError, WindowStore};
