use std::time::Duration;

use crate::config::RetryConfig;

/// Retries allowed after the original attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Backoff step: retry N waits N steps.
pub const DEFAULT_DELAY_STEP: Duration = Duration::from_millis(1000);

/// Linear backoff with a retry ceiling.
///
/// The delay before retry N is `N * delay_step`: 1s, 2s, ... 10s with the
/// defaults, 55s in total. No jitter and no cap; callers rely on the cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries (not counting the original attempt).
    pub max_retries: u32,
    /// Delay added per retry.
    pub delay_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay_step: DEFAULT_DELAY_STEP,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &RetryConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            delay_step: Duration::from_millis(cfg.delay_step_ms),
        }
    }

    /// True when `attempt` (0 = original try) has used up the retry budget.
    pub fn exhausted(&self, attempt: u32) -> bool {
        attempt >= self.max_retries
    }

    /// Delay to wait before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.delay_step.saturating_mul(retry)
    }

    /// Upper bound on transport calls for one outer call.
    pub fn max_transport_calls(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Sum of all backoff delays if every retry is used.
    pub fn total_delay(&self) -> Duration {
        (1..=self.max_retries)
            .map(|n| self.delay_for(n))
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_cadence() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_for(1), Duration::from_secs(1));
        assert_eq!(p.delay_for(2), Duration::from_secs(2));
        assert_eq!(p.delay_for(10), Duration::from_secs(10));
    }

    #[test]
    fn no_cap_on_delay() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_for(100), Duration::from_secs(100));
    }

    #[test]
    fn defaults_allow_eleven_calls_and_55s() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_transport_calls(), 11);
        assert_eq!(p.total_delay(), Duration::from_secs(55));
    }

    #[test]
    fn respects_max_retries() {
        let p = RetryPolicy {
            max_retries: 3,
            delay_step: Duration::from_millis(10),
        };
        assert!(!p.exhausted(0));
        assert!(!p.exhausted(2));
        assert!(p.exhausted(3));
        assert!(p.exhausted(4));
    }

    #[test]
    fn from_config_uses_millis() {
        let p = RetryPolicy::from_config(&RetryConfig {
            max_retries: 2,
            delay_step_ms: 250,
        });
        assert_eq!(p.max_retries, 2);
        assert_eq!(p.delay_for(2), Duration::from_millis(500));
    }
}
