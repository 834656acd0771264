//! Provider seam
//!
//! A provider performs one network call per prompt and hands back whatever
//! shape it received. Turning that shape into text is the extractor's job.

use crate::error::GenerationError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Lazily computed text, e.g. an SDK helper that joins candidate parts
pub type TextAccessor = Arc<dyn Fn() -> Result<String, GenerationError> + Send + Sync>;

/// Raw provider response of provider-defined shape
#[derive(Clone, Default)]
pub struct ProviderResponse {
    accessor: Option<TextAccessor>,
    payload: Value,
}

impl ProviderResponse {
    /// Wrap a JSON payload
    #[inline]
    #[must_use]
    pub fn from_payload(payload: Value) -> Self {
        Self {
            accessor: None,
            payload,
        }
    }

    /// A response with nothing in it
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach a callable text accessor
    #[must_use]
    pub fn with_text_accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn() -> Result<String, GenerationError> + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    /// Callable text accessor, if any
    #[inline]
    #[must_use]
    pub fn text_accessor(&self) -> Option<&TextAccessor> {
        self.accessor.as_ref()
    }

    /// Top-level payload
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Object the text fields are read from
    ///
    /// Wrapped responses (`{"response": {...}}`) carry their fields one level
    /// down; everything else carries them at the top level.
    #[must_use]
    pub fn carrier(&self) -> &Value {
        match self.payload.get("response") {
            Some(inner) if !inner.is_null() => inner,
            _ => &self.payload,
        }
    }

    /// Whether the carrier is a nested wrapper rather than the payload itself
    #[inline]
    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        !std::ptr::eq(self.carrier(), &self.payload)
    }
}

impl fmt::Debug for ProviderResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderResponse")
            .field("has_text_accessor", &self.accessor.is_some())
            .field("payload", &self.payload)
            .finish()
    }
}

impl From<Value> for ProviderResponse {
    fn from(payload: Value) -> Self {
        Self::from_payload(payload)
    }
}

/// Outbound call to a text-generation provider
///
/// Implementations hold their own credentials and transport and are shared
/// read-only across requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Issue one call for `prompt`
    async fn call(&self, prompt: &str) -> Result<ProviderResponse, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn carrier_prefers_wrapped_response() {
        let response = ProviderResponse::from(json!({"response": {"text": "a"}, "text": "b"}));
        assert_eq!(response.carrier(), &json!({"text": "a"}));
        assert!(response.is_wrapped());
    }

    #[test]
    fn carrier_falls_back_to_payload() {
        let response = ProviderResponse::from(json!({"response": null, "text": "b"}));
        assert_eq!(response.carrier()["text"], "b");
        assert!(!response.is_wrapped());
    }

    #[test]
    fn debug_hides_accessor_body() {
        let response = ProviderResponse::empty().with_text_accessor(|| Ok("x".into()));
        let debug = format!("{response:?}");
        assert!(debug.contains("has_text_accessor: true"));
    }
}
