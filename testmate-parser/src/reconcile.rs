//! Count reconciliation: requested vs. parsed.
//!
//! Purely diagnostic. A mismatch is reported to the caller and logged,
//! but never mutates the set and never triggers a re-request.

use tracing::warn;

/// Outcome of comparing the requested count with the parsed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOutcome {
    /// No explicit count was requested; nothing to compare.
    Unrequested,
    /// The parsed count matches the requested count.
    Match(u32),
    /// The engine returned a different number of cases than requested.
    Mismatch {
        /// The count that was requested.
        requested: u32,
        /// The count that was actually parsed.
        parsed: usize,
    },
}

impl CountOutcome {
    /// Whether this outcome is a mismatch.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, CountOutcome::Mismatch { .. })
    }
}

/// Compare a requested count against the size of the parsed set.
pub fn reconcile(requested: Option<u32>, parsed: usize) -> CountOutcome {
    match requested {
        None => CountOutcome::Unrequested,
        Some(requested) if requested as usize == parsed => CountOutcome::Match(requested),
        Some(requested) => {
            warn!(requested, parsed, "Test case count mismatch");
            CountOutcome::Mismatch { requested, parsed }
        }
    }
}
