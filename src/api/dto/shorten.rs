//! DTOs for the shorten endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for custom slug characters; length and edge rules are
/// enforced by [`crate::utils::slug::validate_custom_slug`].
static CUSTOM_SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").unwrap());

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten. HTTPS-only; checked against the URL
    /// guard before allocation.
    #[validate(length(min = 1, message = "long_url is required"))]
    pub long_url: String,

    /// Optional custom slug instead of a generated one.
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*CUSTOM_SLUG_REGEX"))]
    pub custom_slug: Option<String>,
}

/// Response for a successful shorten request.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub slug: String,
    pub short_url: String,
    pub long_url: String,
    /// Requests left in the client's current rate window, clamped at 0.
    pub limit_remaining: u64,
    pub message: String,
}
