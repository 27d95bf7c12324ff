//! Application error type and HTTP response mapping.
//!
//! Every failure that crosses a component boundary is a tagged [`AppError`]
//! variant; callers branch on the variant, never on message text. The HTTP
//! layer renders errors as a JSON envelope:
//!
//! ```json
//! { "error": { "code": "conflict", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

use crate::domain::stores::StoreError;

/// Wire representation of an error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Application-level error taxonomy.
///
/// Variants map one-to-one onto the failure classes of the allocation
/// protocol and the admission counter:
///
/// - [`AppError::Validation`] - bad input (non-HTTPS URL, malformed slug)
/// - [`AppError::Conflict`] - custom slug already claimed, never retried
/// - [`AppError::NotFound`] - no mapping for a slug (or it expired)
/// - [`AppError::RateLimited`] - admission quota exhausted for this client
/// - [`AppError::Capacity`] - random-slug retries exhausted
/// - [`AppError::StoreUnavailable`] - store transport failure; admission
///   control fails closed on this variant
/// - [`AppError::Internal`] - anything else
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Conflict { message: String, details: Value },
    NotFound { message: String, details: Value },
    RateLimited { message: String, details: Value },
    Capacity { message: String, details: Value },
    StoreUnavailable { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn too_many_requests(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }

    pub fn capacity(message: impl Into<String>, details: Value) -> Self {
        Self::Capacity {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Adds a field to the error's `details` object, keeping existing keys.
    ///
    /// Non-object `details` are replaced by an object holding only the new
    /// field.
    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        let details = match &mut self {
            AppError::Validation { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::RateLimited { details, .. }
            | AppError::Capacity { details, .. }
            | AppError::StoreUnavailable { details, .. }
            | AppError::Internal { details, .. } => details,
        };
        match details.as_object_mut() {
            Some(map) => {
                map.insert(key.to_string(), value);
            }
            None => *details = json!({ key: value }),
        }
        self
    }

    /// Splits the error into its HTTP status and wire payload.
    fn into_parts(self) -> (StatusCode, ErrorInfo) {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::RateLimited { message, details } => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                message,
                details,
            ),
            AppError::Capacity { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "capacity_exhausted",
                message,
                details,
            ),
            AppError::StoreUnavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        (
            status,
            ErrorInfo {
                code,
                message,
                details,
            },
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::RateLimited { message, .. }
            | AppError::Capacity { message, .. }
            | AppError::StoreUnavailable { message, .. }
            | AppError::Internal { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.into_parts();
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::unavailable("Store unavailable", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Request validation failed", json!(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_to_unavailable() {
        let err: AppError = StoreError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::bad_request("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::conflict("x", json!({})), StatusCode::CONFLICT),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (
                AppError::too_many_requests("x", json!({})),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                AppError::capacity("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::unavailable("x", json!({})),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = err.into_parts();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_with_detail_extends_existing_object() {
        let err = AppError::conflict("x", json!({ "slug": "promo" }))
            .with_detail("limit_remaining", json!(7));
        let (_, info) = err.into_parts();
        assert_eq!(info.details["slug"], "promo");
        assert_eq!(info.details["limit_remaining"], 7);
    }

    #[test]
    fn test_with_detail_replaces_non_object_details() {
        let err = AppError::capacity("x", Value::Null).with_detail("limit_remaining", json!(0));
        let (_, info) = err.into_parts();
        assert_eq!(info.details, json!({ "limit_remaining": 0 }));
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::conflict("Custom slug is already in use", json!({}));
        assert_eq!(err.to_string(), "Custom slug is already in use");
    }
}
