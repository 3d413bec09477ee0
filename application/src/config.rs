//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as engine timeouts and the retry policy of plan generation.

use std::time::Duration;

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Application behavior configuration.
///
/// Controls runtime behavior of use cases like timeout limits for engine calls
/// and how often a rejected or failed plan request is re-issued.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for an engine response before timing out.
    pub timeout: Option<Duration>,
    /// Total engine calls per plan request, including the first one.
    pub max_attempts: u32,
    /// Base delay before retrying an upstream failure; doubled per attempt.
    pub retry_backoff: Duration,
    /// Remove the group's records once a plan has been accepted.
    pub clear_after_plan: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            max_attempts: 1,
            retry_backoff: Duration::from_millis(500),
            clear_after_plan: true,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
            ..Self::default()
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_clear_after_plan(mut self, clear: bool) -> Self {
        self.clear_after_plan = clear;
        self
    }

    /// Attempts actually made; zero is treated as one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before the retry that follows `failed_attempt` (1-based).
    ///
    /// Exponential: base, 2x base, 4x base, ... capped at 30 seconds.
    pub fn backoff_for(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(16);
        self.retry_backoff
            .saturating_mul(1u32 << exponent)
            .min(MAX_BACKOFF)
    }
}
