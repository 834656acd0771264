//! Generation client configuration
//!
//! The credential is the only switch that matters at runtime: without it the
//! client is built in its disabled state and every call yields no text.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the provider credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "GEMINI_MODEL";
/// Environment variable overriding the provider base URL
pub const ENDPOINT_ENV: &str = "GEMINI_ENDPOINT";

/// Default model used for both catalog descriptions and dashboard insights
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Default provider base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Provider credential
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a credential, rejecting blank values
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Expose the secret for request signing
    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

fn blank_key_as_none<'de, D>(deserializer: D) -> Result<Option<ApiKey>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(ApiKey::new))
}

/// Bounded-attempts retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts (at least one is always made)
    pub max_attempts: u32,
    /// Per-attempt deadline in milliseconds
    pub attempt_timeout_ms: u64,
}

impl RetryPolicy {
    /// Create a policy
    #[inline]
    #[must_use]
    pub fn new(max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            attempt_timeout_ms: u64::try_from(attempt_timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// A single bounded attempt
    #[inline]
    #[must_use]
    pub fn single_attempt(attempt_timeout: Duration) -> Self {
        Self::new(1, attempt_timeout)
    }

    /// Per-attempt deadline
    #[inline]
    #[must_use]
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    /// Attempts actually made, never zero
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout_ms: 7_000,
        }
    }
}

/// Generation client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Provider credential; absent means the client is disabled
    #[serde(skip_serializing, deserialize_with = "blank_key_as_none")]
    pub api_key: Option<ApiKey>,
    /// Model name
    pub model: String,
    /// Provider base URL
    pub endpoint: String,
    /// Transport-level timeout for a single HTTP request, in seconds
    pub request_timeout_secs: u64,
    /// Retry policy for callers that go through the retry wrapper
    pub retry: RetryPolicy,
}

impl GenerationConfig {
    /// Create default configuration (no credential)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `GEMINI_*` environment variables on top of this configuration
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.api_key = ApiKey::new(key);
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                self.model = model.trim().to_string();
            }
        }
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                self.endpoint = endpoint.trim().trim_end_matches('/').to_string();
            }
        }
        self
    }

    /// With credential
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = ApiKey::new(key);
        self
    }

    /// With model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// With retry policy
    #[inline]
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Whether a credential is present
    #[inline]
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Transport-level request timeout
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 60,
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_retry_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.attempt_timeout(), Duration::from_millis(7_000));
    }

    #[test]
    fn zero_attempts_still_makes_one() {
        let policy = RetryPolicy::new(0, Duration::from_millis(10));
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn blank_api_key_is_absent() {
        assert!(ApiKey::new("   ").is_none());
        assert!(!GenerationConfig::new().with_api_key("").is_configured());
        assert!(GenerationConfig::new().with_api_key("k").is_configured());
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        assert!(!format!("{key:?}").contains("super-secret"));
    }

    #[test]
    fn api_key_never_serialized() {
        let config = GenerationConfig::new().with_api_key("super-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn blank_key_in_file_is_absent() {
        let config: GenerationConfig = serde_json::from_str(r#"{"api_key":"  "}"#).unwrap();
        assert!(!config.is_configured());
        let config: GenerationConfig = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
        assert_eq!(config.api_key.unwrap().expose(), "k");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{"model":"m","retry":{"max_attempts":5}}"#).unwrap();
        assert_eq!(config.model, "m");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.attempt_timeout_ms, 7_000);
    }
}
