//! Oficina GenAI - resilient text generation
//!
//! Calls an unreliable, latency-variable text-generation provider and turns
//! every outcome into text-or-absent:
//! - [`extract`] normalizes heterogeneous provider responses into plain text
//! - [`GenerationClient`] issues one call per request and never raises
//! - [`RetryingGenerator`] bounds each attempt and retries up to a budget
//!
//! # Example
//!
//! ```rust,ignore
//! use oficina_genai::{GenerationClient, GenerationConfig, GenerationRequest, RetryingGenerator};
//!
//! # async fn example() {
//! let config = GenerationConfig::from_env();
//! let generator = RetryingGenerator::with_policy(GenerationClient::from_config(&config), config.retry);
//!
//! let request = GenerationRequest::product("Filtro de óleo", "Motor");
//! if let Some(text) = generator.generate_with_retry(&request).await.into_text() {
//!     println!("{text}");
//! }
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod provider;
pub mod request;
pub mod retry;

pub use client::{GenerationClient, Generator};
pub use config::{ApiKey, GenerationConfig, RetryPolicy};
pub use error::GenerationError;
pub use extract::{extract, ExtractionRule};
pub use gemini::GeminiProvider;
pub use provider::{ProviderResponse, TextAccessor, TextProvider};
pub use request::{GenerationRequest, GenerationResult};
pub use retry::{AttemptFailure, RetryingGenerator};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the generation client
    pub use crate::{
        GenerationClient, GenerationConfig, GenerationRequest, GenerationResult, Generator,
        RetryPolicy, RetryingGenerator,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
