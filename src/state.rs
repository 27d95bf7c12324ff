//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AdmissionCounter, ShortenerService};

/// Per-request view of the service's long-lived components.
///
/// Handlers are stateless; all cross-request coordination lives in the
/// external store behind the services.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub admission: Arc<AdmissionCounter>,
    pub base_url: String,
    /// When true, client identity for rate limiting comes from
    /// X-Forwarded-For / X-Real-IP instead of the peer socket address.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        shortener: Arc<ShortenerService>,
        admission: Arc<AdmissionCounter>,
        base_url: String,
        behind_proxy: bool,
    ) -> Self {
        Self {
            shortener,
            admission,
            base_url,
            behind_proxy,
        }
    }

    /// Full short URL for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/s/{}", self.base_url.trim_end_matches('/'), slug)
    }
}
