//! Single-attempt generation client
//!
//! Builds the prompt, issues exactly one provider call and extracts text.
//! Every failure is logged here and collapses to [`GenerationResult::Absent`].

use crate::config::GenerationConfig;
use crate::extract::extract;
use crate::gemini::GeminiProvider;
use crate::provider::TextProvider;
use crate::request::{GenerationRequest, GenerationResult};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Anything that turns a request into text-or-absent without raising
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce text for `request`
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult;
}

#[async_trait]
impl<G: Generator + ?Sized> Generator for Arc<G> {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        (**self).generate(request).await
    }
}

/// Generation client, either wired to a provider or permanently disabled
#[derive(Clone)]
pub enum GenerationClient {
    /// No credential at startup: every call yields no text
    Disabled,
    /// Calls go to this provider
    Enabled(Arc<dyn TextProvider>),
}

impl GenerationClient {
    /// Build the client from configuration
    ///
    /// A missing credential, or a provider that fails to initialize, yields
    /// [`GenerationClient::Disabled`]; the condition is logged once here.
    #[must_use]
    pub fn from_config(config: &GenerationConfig) -> Self {
        let Some(api_key) = config.api_key.clone() else {
            tracing::warn!(
                env = crate::config::API_KEY_ENV,
                "generation credential not set; generation calls will be skipped"
            );
            return Self::Disabled;
        };
        match GeminiProvider::new(config, api_key) {
            Ok(provider) => {
                tracing::debug!(model = %provider.model(), "generation client enabled");
                Self::Enabled(Arc::new(provider))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize generation provider");
                Self::Disabled
            }
        }
    }

    /// Wire the client to an explicit provider
    #[inline]
    #[must_use]
    pub fn with_provider(provider: Arc<dyn TextProvider>) -> Self {
        Self::Enabled(provider)
    }

    /// Whether calls reach a provider
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

impl fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("GenerationClient::Disabled"),
            Self::Enabled(_) => f.write_str("GenerationClient::Enabled"),
        }
    }
}

#[async_trait]
impl Generator for GenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let Self::Enabled(provider) = self else {
            return GenerationResult::Absent;
        };

        let prompt = request.prompt();
        let response = match provider.call(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    request = %request,
                    error = %e,
                    retryable = e.is_retryable(),
                    "generation call failed"
                );
                return GenerationResult::Absent;
            }
        };

        match extract(&response) {
            Ok(result) => {
                if !result.is_text() {
                    tracing::debug!(request = %request, "provider response carried no text");
                }
                result
            }
            Err(e) => {
                tracing::error!(request = %request, error = %e, "failed to extract generated text");
                GenerationResult::Absent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::provider::{MockTextProvider, ProviderResponse};
    use serde_json::json;
    use tracing_test::traced_test;

    fn client_with(mock: MockTextProvider) -> GenerationClient {
        GenerationClient::with_provider(Arc::new(mock))
    }

    #[tokio::test]
    #[traced_test]
    async fn missing_credential_warns_once() {
        let client = GenerationClient::from_config(&GenerationConfig::new());
        for _ in 0..3 {
            let result = client
                .generate(&GenerationRequest::product("Vela", "Ignição"))
                .await;
            assert_eq!(result, GenerationResult::Absent);
        }

        logs_assert(|lines: &[&str]| {
            let warnings: Vec<_> = lines.iter().filter(|line| line.contains("WARN")).collect();
            match warnings.as_slice() {
                [only] if only.contains("generation credential not set") => Ok(()),
                other => Err(format!("expected one credential warning, got {other:?}")),
            }
        });
    }

    #[tokio::test]
    async fn disabled_client_is_always_absent() {
        let client = GenerationClient::from_config(&GenerationConfig::new());
        assert!(!client.is_enabled());
        let result = client
            .generate(&GenerationRequest::product("Produto", "Categoria"))
            .await;
        assert_eq!(result, GenerationResult::Absent);
    }

    #[test]
    fn configured_client_is_enabled() {
        let config = GenerationConfig::new().with_api_key("test-key");
        assert!(GenerationClient::from_config(&config).is_enabled());
    }

    #[tokio::test]
    async fn returns_extracted_text() {
        let mut mock = MockTextProvider::new();
        mock.expect_call()
            .withf(|prompt| prompt.contains("\"Pastilha\"") && prompt.contains("\"Freio\""))
            .times(1)
            .returning(|_| {
                Ok(ProviderResponse::from(json!({"response": {"text": "texto string"}})))
            });

        let result = client_with(mock)
            .generate(&GenerationRequest::product("Pastilha", "Freio"))
            .await;
        assert_eq!(result, GenerationResult::Text("texto string".into()));
    }

    #[tokio::test]
    async fn provider_error_becomes_absent() {
        let mut mock = MockTextProvider::new();
        mock.expect_call()
            .times(1)
            .returning(|_| Err(GenerationError::provider(500, "Falha IA")));

        let result = client_with(mock)
            .generate(&GenerationRequest::product("Produto", "Categoria"))
            .await;
        assert_eq!(result, GenerationResult::Absent);
    }

    #[tokio::test]
    async fn accessor_error_becomes_absent() {
        let mut mock = MockTextProvider::new();
        mock.expect_call().times(1).returning(|_| {
            Ok(ProviderResponse::empty()
                .with_text_accessor(|| Err(GenerationError::Accessor("boom".into()))))
        });

        let result = client_with(mock)
            .generate(&GenerationRequest::product("Produto", "Categoria"))
            .await;
        assert_eq!(result, GenerationResult::Absent);
    }

    #[tokio::test]
    async fn shapeless_response_is_absent() {
        let mut mock = MockTextProvider::new();
        mock.expect_call()
            .times(1)
            .returning(|_| Ok(ProviderResponse::empty()));

        let result = client_with(mock)
            .generate(&GenerationRequest::snapshot(json!([])))
            .await;
        assert_eq!(result, GenerationResult::Absent);
    }
}
