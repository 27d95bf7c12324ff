//! # Shortlink
//!
//! A fast, secure URL shortening service built with Axum and Redis.
//!
//! ## Architecture
//!
//! The crate follows a layered design:
//!
//! - **Domain Layer** ([`domain`]) - Store capability traits and core types
//! - **Application Layer** ([`application`]) - The slug allocation protocol
//!   and the sliding-window admission counter
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory
//!   store backends
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Design
//!
//! The service is a stateless request handler: every coordination point is
//! an atomic operation against the external key-value store, keyed so that
//! conflicts only arise between operations on the same long URL, slug, or
//! client. Slug allocation runs as Lua-scripted read-check-write steps;
//! the rate limiter is an exact sliding window over a per-client sorted
//! set, and fails closed when the store is unavailable.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//!
//! # Start the service
//! cargo run
//!
//! # Or run without Redis on the in-process store
//! MEMORY_STORE=true cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AdmissionCounter, ShortenerService};
    pub use crate::domain::{AdmissionDecision, Allocation, AllocationKind};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
