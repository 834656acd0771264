//! Testing utilities for the Oficina workspace
//!
//! Scripted generators that stand in for the provider-backed client.

#![allow(missing_docs)]

use async_trait::async_trait;
use oficina_genai::{GenerationRequest, GenerationResult, Generator};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays queued results in order, then `Absent`, recording every request
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<GenerationResult>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(replies: impl IntoIterator<Item = GenerationResult>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Answers once with `text`, then `Absent`
    pub fn text(text: &str) -> Self {
        Self::new([GenerationResult::Text(text.to_string())])
    }

    /// Never produces text
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: GenerationResult) {
        self.replies.lock().push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        self.replies.lock().pop_front().unwrap_or_default()
    }
}

/// Never completes; exercises per-attempt deadlines
#[derive(Debug, Default)]
pub struct HangingGenerator {
    calls: AtomicUsize,
}

impl HangingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for HangingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> GenerationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

pub fn text(s: &str) -> GenerationResult {
    GenerationResult::Text(s.to_string())
}
