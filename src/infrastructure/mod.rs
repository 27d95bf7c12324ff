//! Store backends.
//!
//! - [`redis`] - Production backend; multi-key steps execute as Lua scripts
//!   so the store serializes conflicting operations
//! - [`memory`] - In-process backend for development without Redis and for
//!   handler tests

pub mod memory;
pub mod redis;
