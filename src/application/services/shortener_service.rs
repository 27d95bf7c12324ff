//! Slug allocation and resolution service.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::allocation::{Allocation, AllocationKind};
use crate::domain::stores::{ClaimOutcome, MappingStore};
use crate::error::AppError;
use crate::utils::slug::generate_slug;
use serde_json::json;
use tracing::debug;

/// Upper bound on random-candidate claim attempts before the allocation is
/// abandoned with [`AppError::Capacity`]. Keeps worst-case latency finite
/// when the slug namespace approaches saturation.
const MAX_CLAIM_ATTEMPTS: usize = 10;

/// Service implementing the race-free allocate-or-reuse protocol.
///
/// All coordination happens inside the store's atomic steps; this service
/// only sequences them and owns the retry and TTL policy. Input URLs must
/// already have passed [`crate::utils::url_guard::is_acceptable`].
pub struct ShortenerService {
    store: Arc<dyn MappingStore>,
    mapping_ttl: Duration,
}

impl ShortenerService {
    pub fn new(store: Arc<dyn MappingStore>, mapping_ttl: Duration) -> Self {
        Self { store, mapping_ttl }
    }

    /// Allocates a slug for `long_url`, or returns the existing one.
    ///
    /// # Protocol
    ///
    /// 1. Dedup fast path: if the URL is already mapped, extend both
    ///    entries' TTLs and return the existing slug (idempotent).
    /// 2. Claim the custom slug if supplied; a taken custom slug is a
    ///    [`AppError::Conflict`] immediately, never retried.
    /// 3. Otherwise claim freshly generated random candidates, retrying on
    ///    collision up to [`MAX_CLAIM_ATTEMPTS`] times.
    ///
    /// A claim that loses to a concurrent request for the *same* URL
    /// returns that request's slug as [`AllocationKind::Existing`], so two
    /// racers never produce two slugs for one URL.
    ///
    /// # Errors
    ///
    /// [`AppError::Conflict`], [`AppError::Capacity`], or
    /// [`AppError::StoreUnavailable`].
    pub async fn allocate(
        &self,
        long_url: &str,
        custom_slug: Option<&str>,
    ) -> Result<Allocation, AppError> {
        if let Some(existing) = self
            .store
            .find_and_refresh(long_url, self.mapping_ttl)
            .await?
        {
            debug!(slug = %existing, "URL already shortened, extending TTL");
            return Ok(Allocation {
                slug: existing,
                kind: AllocationKind::Existing,
            });
        }

        if let Some(custom) = custom_slug {
            return match self
                .store
                .try_claim(custom, long_url, self.mapping_ttl)
                .await?
            {
                ClaimOutcome::Created => Ok(Allocation {
                    slug: custom.to_string(),
                    kind: AllocationKind::Created,
                }),
                ClaimOutcome::Existing(slug) => Ok(Allocation {
                    slug,
                    kind: AllocationKind::Existing,
                }),
                ClaimOutcome::Taken => Err(AppError::conflict(
                    "Custom slug is already in use",
                    json!({ "slug": custom }),
                )),
            };
        }

        for attempt in 1..=MAX_CLAIM_ATTEMPTS {
            let candidate = generate_slug();

            match self
                .store
                .try_claim(&candidate, long_url, self.mapping_ttl)
                .await?
            {
                ClaimOutcome::Created => {
                    return Ok(Allocation {
                        slug: candidate,
                        kind: AllocationKind::Created,
                    });
                }
                ClaimOutcome::Existing(slug) => {
                    return Ok(Allocation {
                        slug,
                        kind: AllocationKind::Existing,
                    });
                }
                ClaimOutcome::Taken => {
                    debug!(attempt, "Slug collision, generating a new candidate");
                }
            }
        }

        Err(AppError::capacity(
            "Failed to allocate a unique slug",
            json!({ "attempts": MAX_CLAIM_ATTEMPTS }),
        ))
    }

    /// Resolves a slug to its long URL, sliding the mapping's TTL.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] when no mapping exists (or it expired),
    /// [`AppError::StoreUnavailable`] on transport failure.
    pub async fn resolve(&self, slug: &str) -> Result<String, AppError> {
        self.store
            .resolve_and_refresh(slug, self.mapping_ttl)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "slug": slug })))
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}
