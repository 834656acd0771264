//! Google Generative Language (Gemini) provider

use crate::config::{ApiKey, GenerationConfig};
use crate::error::GenerationError;
use crate::provider::{ProviderResponse, TextProvider};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// `generateContent` over HTTPS
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: ApiKey,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Build a provider from configuration and credential
    ///
    /// # Errors
    /// Returns [`GenerationError::Init`] when the HTTP client cannot be built.
    pub fn new(config: &GenerationConfig, api_key: ApiKey) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GenerationError::Init(e.to_string()))?;
        Ok(Self {
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Model this provider calls
    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    async fn call(&self, prompt: &str) -> Result<ProviderResponse, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(GenerationError::provider(status.as_u16(), text));
        }
        let payload: Value = resp
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        Ok(into_provider_response(payload))
    }
}

/// Expose the candidate text through an accessor, SDK style
fn into_provider_response(payload: Value) -> ProviderResponse {
    let candidates = payload.get("candidates").cloned();
    let response = ProviderResponse::from_payload(payload);
    match candidates {
        Some(candidates) => {
            response.with_text_accessor(move || candidate_text(&candidates))
        }
        None => response,
    }
}

/// Join the text parts of the first candidate
fn candidate_text(candidates: &Value) -> Result<String, GenerationError> {
    let parts = candidates
        .get(0)
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| GenerationError::Accessor("candidate has no content parts".to_string()))?;
    Ok(parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect())
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}
