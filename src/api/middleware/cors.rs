//! CORS policy layer.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Builds the CORS layer from the configured allowed origins.
///
/// With an empty origin list no cross-origin requests are allowed, which is
/// the safe default for a service consumed same-origin. Credentials are
/// only enabled together with an explicit origin list, as a wildcard with
/// credentials is rejected by browsers (and by `tower-http`).
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        cors
    } else {
        cors.allow_origin(origins).allow_credentials(true)
    }
}
