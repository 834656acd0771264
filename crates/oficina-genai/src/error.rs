//! Error types for the generation client
//!
//! These errors describe why a single provider call could not produce text:
//! - Transport failures (connect, TLS, body read)
//! - Non-success provider status codes
//! - Response bodies that cannot be decoded
//! - Text accessors that fail when invoked
//!
//! None of them cross the [`Generator`](crate::Generator) boundary; the client
//! logs them and collapses them to [`GenerationResult::Absent`](crate::GenerationResult::Absent).

/// Failure of one provider call or of extracting text from its response
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// HTTP transport failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned {status}: {body}")]
    Provider {
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Response body could not be decoded
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// The response's text accessor failed when invoked
    #[error("text accessor failed: {0}")]
    Accessor(String),

    /// HTTP client could not be constructed
    #[error("client initialization failed: {0}")]
    Init(String),
}

impl GenerationError {
    /// Check if another attempt could plausibly succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Provider { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidResponse(_) | Self::Accessor(_) | Self::Init(_) => false,
        }
    }

    /// Create a provider status error, truncating oversized bodies
    #[must_use]
    pub fn provider(status: u16, body: impl Into<String>) -> Self {
        const MAX_BODY: usize = 512;
        let mut body = body.into();
        if body.len() > MAX_BODY {
            let mut end = MAX_BODY;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body.truncate(end);
        }
        Self::Provider { status, body }
    }
}
