//! Slug generation and validation.
//!
//! Random slugs are fixed-length alphanumeric tokens drawn from a
//! cryptographically strong source. Uniqueness is probabilistic; the
//! allocation protocol handles collisions by retrying with a fresh
//! candidate.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use serde_json::json;

/// Length of generated slugs. Six characters over the 62-symbol alphabet
/// gives ~5.7e10 distinct values.
pub const SLUG_LENGTH: usize = 6;

/// Slugs that would shadow service routes.
const RESERVED_SLUGS: &[&str] = &["health", "shorten", "s"];

/// Generates a random slug of [`SLUG_LENGTH`] alphanumeric characters.
///
/// `Alphanumeric` samples uniformly from `[a-zA-Z0-9]`; the thread RNG is a
/// CSPRNG reseeded from the operating system.
pub fn generate_slug() -> String {
    let rng = rand::rng();
    rng.sample_iter(Alphanumeric)
        .take(SLUG_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom slug.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: ASCII letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_slug(slug: &str) -> Result<(), AppError> {
    if slug.len() < 3 || slug.len() > 32 {
        return Err(AppError::bad_request(
            "Custom slug must be 3-32 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom slug can only contain letters, digits, and hyphens",
            json!({ "slug": slug }),
        ));
    }

    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom slug cannot start or end with a hyphen",
            json!({ "slug": slug }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug.to_ascii_lowercase().as_str()) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}
