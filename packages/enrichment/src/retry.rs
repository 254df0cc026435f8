//! Injectable retry policy for the profile lookup.

use std::time::Duration;

/// Retry policy with linearly increasing backoff.
///
/// The delay after a failed attempt N is `base_delay * N`, so a fully
/// failing sequence waits `base_delay`, then `2 * base_delay`, and so on —
/// monotonically increasing between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,

    /// Delay unit the per-attempt backoff scales from
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(800),
        }
    }
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Backoff to wait after failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Total backoff across a fully failing sequence (no delay follows the
    /// final attempt).
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts).map(|n| self.delay_for(n)).sum()
    }
}
