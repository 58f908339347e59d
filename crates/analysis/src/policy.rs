//! Hardening knobs for analysis calls.

use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_RETRIES: u32 = 0;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;
pub const DEFAULT_SEGMENT_MAX_CHARS: usize = 100_000;
pub const DEFAULT_SEGMENT_OVERLAP_CHARS: usize = 2_000;
/// Ceiling for any single retry wait.
pub const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(60);

/// How a single conversation is sent to the model.
///
/// Defaults give the minimal contract: one attempt per segment, no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPolicy {
    /// Upper bound for one model call.
    pub timeout: Duration,
    /// Extra attempts after the first failure.
    pub max_retries: u32,
    /// Wait before the first retry; doubled for every following one, up to [`MAX_RETRY_BACKOFF`].
    pub retry_backoff: Duration,
    /// Texts longer than this (in chars) are split into segments.
    pub segment_max_chars: usize,
    /// Chars of trailing context repeated at the start of the next segment.
    pub segment_overlap_chars: usize,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            segment_max_chars: DEFAULT_SEGMENT_MAX_CHARS,
            segment_overlap_chars: DEFAULT_SEGMENT_OVERLAP_CHARS,
        }
    }
}

impl AnalysisPolicy {
    /// Delay before retry number `retry` (1-based): `backoff * 2^(retry-1)`, capped at
    /// [`MAX_RETRY_BACKOFF`].
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.retry_backoff
            .saturating_mul(factor)
            .min(MAX_RETRY_BACKOFF)
    }
}
