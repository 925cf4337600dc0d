//! # Cache Policy
//!
//! Per-query knobs: staleness window, retention window, retry count and backoff, refetch
//! triggers, and an end-to-end timeout. Every knob is independent.

use std::time::Duration;

/// Exponential backoff between retry attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
    pub multiplier: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(30),
            multiplier: 2,
        }
    }
}

impl Backoff {
    /// No delay between attempts.
    pub fn none() -> Self {
        Self {
            initial: Duration::ZERO,
            max: Duration::ZERO,
            multiplier: 1,
        }
    }

    /// Delay before retry number `retry` (zero-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(retry);
        self.initial.saturating_mul(factor).min(self.max)
    }
}

/// Caching and retry policy for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPolicy {
    /// Age after which cached data is stale and eligible for background refresh.
    pub stale_time: Duration,
    /// How long an unobserved entry is retained before eviction.
    pub gc_time: Duration,
    /// Retries after the first failed attempt.
    pub retry: u32,
    pub backoff: Backoff,
    pub refetch_on_window_focus: bool,
    pub refetch_on_mount: bool,
    /// Upper bound on one fetch including all retries. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            gc_time: Duration::from_secs(2 * 60),
            retry: 3,
            backoff: Backoff::default(),
            refetch_on_window_focus: true,
            refetch_on_mount: true,
            timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl QueryPolicy {
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }

    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn refetch_on_window_focus(mut self, enabled: bool) -> Self {
        self.refetch_on_window_focus = enabled;
        self
    }

    pub fn refetch_on_mount(mut self, enabled: bool) -> Self {
        self.refetch_on_mount = enabled;
        self
    }

    /// Total attempts a failing fetch makes before settling into `Error`.
    pub fn max_attempts(&self) -> u32 {
        self.retry.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let backoff = Backoff::default();
        assert_eq!(backoff.delay_for(0), Duration::from_secs(1));
        assert_eq!(backoff.delay_for(1), Duration::from_secs(2));
        assert_eq!(backoff.delay_for(2), Duration::from_secs(4));
        assert_eq!(backoff.delay_for(10), Duration::from_secs(30));
    }

    #[test]
    fn default_policy_matches_content_defaults() {
        let policy = QueryPolicy::default();
        assert_eq!(policy.stale_time, Duration::from_secs(300));
        assert_eq!(policy.gc_time, Duration::from_secs(120));
        assert_eq!(policy.max_attempts(), 4);
        assert!(policy.refetch_on_window_focus && policy.refetch_on_mount);
    }
}
