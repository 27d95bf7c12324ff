//! Router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`   - Create (or reuse) a short link; rate limited
//! - `GET  /s/{slug}`  - Short link redirect; bypasses the rate limiter
//! - `GET  /health`    - Health check
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **CORS** - origins from configuration
//! - **Path normalization** - trailing slash handling

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, allowed_origins: &[String]) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/s/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(cors::layer(allowed_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
