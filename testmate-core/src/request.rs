//! Generation requests and the requested-count clamp.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound on the number of test cases a single generation may request.
///
/// Enforced both at request construction and at prompt-build time.
pub const MAX_TEST_CASE_COUNT: u32 = 25;

/// Clamp a requested count to [`MAX_TEST_CASE_COUNT`].
///
/// Emits a warning when the count is reduced; never fails.
pub fn clamp_count(count: u32) -> u32 {
    if count > MAX_TEST_CASE_COUNT {
        warn!(
            requested = count,
            limit = MAX_TEST_CASE_COUNT,
            "Requested test case count exceeds limit, clamping"
        );
        MAX_TEST_CASE_COUNT
    } else {
        count
    }
}

/// A single generation request: the raw requirement text plus an optional
/// explicit test-case count.
///
/// The requirement is immutable once submitted; a changed requirement is a
/// new request. The count, when present, is already clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text requirement to generate test cases for.
    pub requirement: String,
    /// Explicit requested count, clamped to [`MAX_TEST_CASE_COUNT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_count: Option<u32>,
}

impl GenerationRequest {
    /// Create a request with no explicit count.
    pub fn new(requirement: impl Into<String>) -> Self {
        Self {
            requirement: requirement.into(),
            requested_count: None,
        }
    }

    /// Set an explicit requested count (clamped).
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.requested_count = Some(clamp_count(count));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_passes_small_counts_through() {
        assert_eq!(clamp_count(1), 1);
        assert_eq!(clamp_count(25), 25);
    }

    #[test]
    fn clamp_limits_large_counts() {
        assert_eq!(clamp_count(26), 25);
        assert_eq!(clamp_count(1000), 25);
    }

    #[test]
    fn request_clamps_count_at_construction() {
        let request = GenerationRequest::new("req").with_count(40);
        assert_eq!(request.requested_count, Some(25));

        let request = GenerationRequest::new("req").with_count(5);
        assert_eq!(request.requested_count, Some(5));
    }
}
