//! Results of slug allocation and admission checks.

/// How a slug was obtained for a long URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationKind {
    /// A fresh mapping was created for this URL.
    Created,
    /// The URL was already mapped; the existing slug was returned and its
    /// TTL extended.
    Existing,
}

/// A successful slug allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub slug: String,
    pub kind: AllocationKind,
}

/// Outcome of an admission check for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionDecision {
    /// Whether the request may proceed to allocation.
    pub allowed: bool,
    /// Requests counted in the current window, including this one when
    /// `allowed` is true. Denied checks do not consume quota.
    pub current_count: u64,
}

impl AdmissionDecision {
    /// Remaining quota for the window, clamped at zero.
    pub fn remaining(&self, max_requests: u32) -> u64 {
        u64::from(max_requests).saturating_sub(self.current_count)
    }
}
