//! Handler for the shorten endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::HeaderMap,
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::info;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::allocation::AllocationKind;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;
use crate::utils::slug::validate_custom_slug;
use crate::utils::url_guard::is_acceptable;

/// Creates (or reuses) a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Flow
///
/// 1. Shape validation of the JSON payload
/// 2. Admission check against the client's sliding window; denial is a
///    429, a store failure is a 503 (fails closed, never grants)
/// 3. URL acceptance (HTTPS-only, injection checks) and custom slug rules
/// 4. Slug allocation: dedup fast path or atomic claim with retry
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com", "custom_slug": "promo" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "slug": "aB3xYz",
///   "short_url": "https://sho.rt/s/aB3xYz",
///   "long_url": "https://example.com",
///   "limit_remaining": 14,
///   "message": "URL shortened successfully"
/// }
/// ```
///
/// # Errors
///
/// 400 invalid URL or slug, 409 custom slug taken, 429 over quota,
/// 500 slug namespace exhausted, 503 store unavailable.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let client = client_ip(&headers, addr, state.behind_proxy);
    let max_requests = state.admission.max_requests();

    let decision = state.admission.check_and_consume(&client).await?;
    let remaining = decision.remaining(max_requests);

    if !decision.allowed {
        return Err(AppError::too_many_requests(
            format!(
                "Rate limit of {} URLs exceeded: try again within {}s",
                max_requests,
                state.admission.window().as_secs()
            ),
            json!({
                "limit_remaining": remaining,
                "max_requests": max_requests,
                "window_secs": state.admission.window().as_secs(),
            }),
        ));
    }

    if !is_acceptable(&payload.long_url) {
        return Err(AppError::bad_request(
            "Invalid or non-HTTPS URL: only HTTPS links are allowed and no scripts",
            json!({ "long_url": payload.long_url }),
        ));
    }

    if let Some(custom) = &payload.custom_slug {
        validate_custom_slug(custom)?;
    }

    // Every response issued after the admission check reports the quota
    // left, error or not.
    let allocation = state
        .shortener
        .allocate(&payload.long_url, payload.custom_slug.as_deref())
        .await
        .map_err(|e| e.with_detail("limit_remaining", json!(remaining)))?;

    info!(
        slug = %allocation.slug,
        kind = ?allocation.kind,
        "Short link ready"
    );

    let message = match allocation.kind {
        AllocationKind::Created => "URL shortened successfully",
        AllocationKind::Existing => "URL was already shortened, TTL extended",
    };

    Ok(Json(ShortenResponse {
        short_url: state.short_url(&allocation.slug),
        slug: allocation.slug,
        long_url: payload.long_url,
        limit_remaining: remaining,
        message: message.to_string(),
    }))
}
