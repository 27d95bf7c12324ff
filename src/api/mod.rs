//! HTTP layer for request/response handling.
//!
//! Translates HTTP requests into the allocation and admission protocols and
//! formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - CORS and request tracing layers

pub mod dto;
pub mod handlers;
pub mod middleware;
