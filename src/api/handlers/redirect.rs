//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /s/{slug}`
///
/// Resolution bypasses admission control and slides the mapping's TTL, so
/// actively used short links stay alive.
///
/// # Errors
///
/// Returns 404 Not Found if the slug doesn't exist or has expired.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let long_url = state.shortener.resolve(&slug).await?;

    debug!(%slug, "Redirecting");

    Ok(Redirect::temporary(&long_url))
}
