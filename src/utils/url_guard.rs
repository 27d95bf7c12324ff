//! URL acceptance predicate.
//!
//! Applied in the HTTP layer before a URL reaches the allocation protocol;
//! the slug store itself never re-validates.

use url::Url;

/// Substrings rejected anywhere in the raw input, case-insensitively.
const FORBIDDEN_PREFIXES: &[&str] = &["javascript:", "data:", "php:"];

/// Returns whether `raw_url` is acceptable for shortening.
///
/// # Rules
///
/// - Must parse as an absolute URL with the `https` scheme
/// - Must not contain angle brackets
/// - Must not contain `javascript:`, `data:`, or `php:` (case-insensitive)
///
/// # Examples
///
/// ```
/// use shortlink::utils::url_guard::is_acceptable;
///
/// assert!(is_acceptable("https://example.com"));
/// assert!(!is_acceptable("http://example.com"));
/// assert!(!is_acceptable("javascript:alert(1)"));
/// ```
pub fn is_acceptable(raw_url: &str) -> bool {
    let raw = raw_url.trim();

    if raw.contains('<') || raw.contains('>') {
        return false;
    }

    let lowered = raw.to_ascii_lowercase();
    if FORBIDDEN_PREFIXES.iter().any(|p| lowered.contains(p)) {
        return false;
    }

    match Url::parse(raw) {
        Ok(parsed) => parsed.scheme() == "https",
        Err(_) => false,
    }
}
