//! Dashboard configuration

use oficina_genai::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default deadline for the insight call
pub const DEFAULT_INSIGHT_TIMEOUT_MS: u64 = 7_000;

/// Insight generation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Attempt budget for one snapshot; a single bounded call by default
    pub retry: RetryPolicy,
}

impl InsightConfig {
    /// Create default config
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set retry policy
    #[inline]
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::single_attempt(Duration::from_millis(DEFAULT_INSIGHT_TIMEOUT_MS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_bounded_attempt() {
        let config = InsightConfig::default();
        assert_eq!(config.retry.attempts(), 1);
        assert_eq!(config.retry.attempt_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn partial_retry_keeps_timeout_default() {
        let config: InsightConfig = serde_json::from_str(r#"{"retry": {"max_attempts": 2}}"#).unwrap();
        assert_eq!(config.retry.attempts(), 2);
        assert_eq!(config.retry.attempt_timeout_ms, 7_000);
    }
}
