//! Response text extraction
//!
//! Providers disagree on where the generated text lives. Extraction walks a
//! fixed list of rules and the first one that yields non-empty text wins:
//!
//! 1. callable text accessor
//! 2. `text` string field
//! 3. `output` string field
//! 4. `outputs[0].content`
//! 5. `text`/`output` on the unwrapped top level, when the fields above were
//!    read from a nested `response` wrapper
//!
//! Anything else is [`GenerationResult::Absent`]. An accessor that fails is
//! reported as an error so the caller can log it.

use crate::error::GenerationError;
use crate::provider::ProviderResponse;
use crate::request::GenerationResult;
use serde_json::Value;

/// One way of locating text in a provider response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// Invoke the response's text accessor
    TextAccessor,
    /// Read a `text` string field
    TextField,
    /// Read an `output` string field
    OutputField,
    /// Read `content` from the first element of `outputs`
    FirstOutputContent,
    /// Read `text`/`output` directly from an unwrapped response
    TopLevelFallback,
}

impl ExtractionRule {
    /// Rules in priority order
    pub const PRIORITY: [ExtractionRule; 5] = [
        Self::TextAccessor,
        Self::TextField,
        Self::OutputField,
        Self::FirstOutputContent,
        Self::TopLevelFallback,
    ];

    /// Apply this rule alone
    ///
    /// # Errors
    /// Returns the accessor's error when [`ExtractionRule::TextAccessor`]
    /// invokes a failing accessor.
    pub fn apply(self, response: &ProviderResponse) -> Result<Option<String>, GenerationError> {
        let found = match self {
            Self::TextAccessor => match response.text_accessor() {
                Some(accessor) => Some(accessor()?),
                None => None,
            },
            Self::TextField => string_field(response.carrier(), "text"),
            Self::OutputField => string_field(response.carrier(), "output"),
            Self::FirstOutputContent => response
                .carrier()
                .get("outputs")
                .and_then(Value::as_array)
                .and_then(|outputs| outputs.first())
                .and_then(|first| first.get("content"))
                .and_then(coerce_to_string),
            Self::TopLevelFallback if response.is_wrapped() => {
                string_field(response.payload(), "text")
                    .or_else(|| string_field(response.payload(), "output"))
            }
            Self::TopLevelFallback => None,
        };
        Ok(found.filter(|text| !text.is_empty()))
    }
}

/// Extract plain text from a provider response
///
/// # Errors
/// Returns [`GenerationError::Accessor`] (or whatever the accessor raised)
/// when the text accessor itself fails.
pub fn extract(response: &ProviderResponse) -> Result<GenerationResult, GenerationError> {
    for rule in ExtractionRule::PRIORITY {
        if let Some(text) = rule.apply(response)? {
            return Ok(GenerationResult::from_text(text));
        }
    }
    Ok(GenerationResult::Absent)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Falsy scalars (`0`, `false`) carry no text
fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
