//! Utility functions for slug handling and request processing.
//!
//! - [`slug`] - Random slug generation and custom slug validation
//! - [`url_guard`] - URL acceptance predicate (HTTPS-only, injection checks)
//! - [`client_ip`] - Client identity extraction for admission control

pub mod client_ip;
pub mod slug;
pub mod url_guard;
