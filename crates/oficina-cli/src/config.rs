//! Application configuration: optional TOML file, then `GEMINI_*` environment

use anyhow::Context;
use oficina_dashboard::InsightConfig;
use oficina_genai::GenerationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Effective configuration of the CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Provider and retry settings
    pub generation: GenerationConfig,
    /// Insight call settings
    pub dashboard: InsightConfig,
}

impl AppConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    /// Fails when the document is not valid configuration.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `path` if given, then apply environment overrides
    ///
    /// # Errors
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_toml_str(&text)
                    .with_context(|| format!("in config file {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Apply `GEMINI_*` variables
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.generation = self.generation.with_env_overrides();
        self
    }

    /// Human-readable dump; the credential is only reported as configured or empty
    ///
    /// # Errors
    /// Fails if the configuration cannot be rendered as TOML.
    pub fn render(&self) -> anyhow::Result<String> {
        let body = toml::to_string_pretty(self).context("failed to render configuration")?;
        let credential = if self.generation.is_configured() {
            "configured"
        } else {
            "empty"
        };
        Ok(format!("# api_key: {credential}\n{body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.generation.retry.attempts(), 3);
        assert_eq!(config.dashboard.retry.attempts(), 1);
        assert!(!config.generation.is_configured());
    }

    #[test]
    fn sections_override_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [generation]
            model = "gemini-2.0-flash"
            api_key = "k"

            [generation.retry]
            max_attempts = 5

            [dashboard.retry]
            attempt_timeout_ms = 3000
            "#,
        )
        .unwrap();

        assert_eq!(config.generation.model, "gemini-2.0-flash");
        assert!(config.generation.is_configured());
        assert_eq!(config.generation.retry.max_attempts, 5);
        assert_eq!(config.generation.retry.attempt_timeout_ms, 7_000);
        assert_eq!(config.dashboard.retry.attempt_timeout_ms, 3_000);
    }

    #[test]
    fn render_hides_credential() {
        let config = AppConfig::from_toml_str("[generation]\napi_key = \"secret-key\"").unwrap();
        let rendered = config.render().unwrap();
        assert!(rendered.starts_with("# api_key: configured"));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("model = "));
    }

    #[test]
    fn unknown_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/oficina.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
