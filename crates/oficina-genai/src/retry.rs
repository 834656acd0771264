//! Bounded retries with a per-attempt deadline
//!
//! Each attempt runs the inner generator under [`tokio::time::timeout`]. When
//! the deadline fires first the in-flight call is dropped, so nothing from a
//! timed-out attempt can complete during a later one. A timeout and a call
//! that produced no text are the same thing here: a failed attempt.

use crate::client::Generator;
use crate::config::RetryPolicy;
use crate::request::{GenerationRequest, GenerationResult};
use async_trait::async_trait;

/// Why an attempt produced no text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The per-attempt deadline elapsed
    Timeout,
    /// The call completed without usable text
    NoText,
}

impl AttemptFailure {
    /// Label used in log lines
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::NoText => "no text",
        }
    }
}

/// Wraps a [`Generator`] with a bounded-attempts, per-attempt-timeout policy
#[derive(Debug, Clone)]
pub struct RetryingGenerator<G> {
    inner: G,
    policy: RetryPolicy,
}

impl<G: Generator> RetryingGenerator<G> {
    /// Wrap `inner` with the default policy (3 attempts, 7 s each)
    #[inline]
    #[must_use]
    pub fn new(inner: G) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    /// Wrap `inner` with an explicit policy
    #[inline]
    #[must_use]
    pub fn with_policy(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Policy in effect
    #[inline]
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Inner generator
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Run attempts until one yields text or the budget is spent
    ///
    /// Never fails; [`GenerationResult::Absent`] is the only failure signal.
    pub async fn generate_with_retry(&self, request: &GenerationRequest) -> GenerationResult {
        let max_attempts = self.policy.attempts();
        let deadline = self.policy.attempt_timeout();

        for attempt in 1..=max_attempts {
            let failure =
                match tokio::time::timeout(deadline, self.inner.generate(request)).await {
                    Ok(GenerationResult::Text(text)) => {
                        tracing::debug!(attempt, request = %request, "generation succeeded");
                        return GenerationResult::Text(text);
                    }
                    Ok(GenerationResult::Absent) => AttemptFailure::NoText,
                    Err(_elapsed) => AttemptFailure::Timeout,
                };
            tracing::warn!(
                attempt,
                max_attempts,
                cause = failure.as_str(),
                timeout_ms = self.policy.attempt_timeout_ms,
                request = %request,
                "generation attempt failed"
            );
        }

        GenerationResult::Absent
    }
}

#[async_trait]
impl<G: Generator> Generator for RetryingGenerator<G> {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        self.generate_with_retry(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use parking_lot::Mutex;
    use std::time::Duration;
    use tracing_test::traced_test;

    enum Step {
        Reply(GenerationResult),
        Hang,
    }

    /// Plays back scripted steps; `Absent` once the script runs out
    struct Script {
        steps: Mutex<VecDeque<Step>>,
        calls: AtomicUsize,
    }

    impl Script {
        fn new(steps: impl IntoIterator<Item = Step>) -> Self {
            Self {
                steps: Mutex::new(steps.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Generator for Script {
        async fn generate(&self, _request: &GenerationRequest) -> GenerationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.steps.lock().pop_front();
            match step {
                Some(Step::Reply(result)) => result,
                Some(Step::Hang) => std::future::pending().await,
                None => GenerationResult::Absent,
            }
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::product("Produto", "Categoria")
    }

    fn text(s: &str) -> Step {
        Step::Reply(GenerationResult::Text(s.to_string()))
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn single_attempt_timeout_returns_absent_with_one_warning() {
        let retrying = RetryingGenerator::with_policy(
            Script::new([Step::Hang]),
            RetryPolicy::new(1, Duration::from_millis(10)),
        );

        let result = retrying.generate_with_retry(&request()).await;

        assert_eq!(result, GenerationResult::Absent);
        assert_eq!(retrying.inner().calls(), 1);
        logs_assert(|lines: &[&str]| {
            let warnings = lines
                .iter()
                .filter(|line| line.contains("generation attempt failed"))
                .count();
            match warnings {
                1 => Ok(()),
                n => Err(format!("expected one attempt warning, saw {n}")),
            }
        });
        assert!(logs_contain("timeout"));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_first_success() {
        let retrying = RetryingGenerator::new(Script::new([
            Step::Reply(GenerationResult::Absent),
            text("segunda tentativa"),
            text("never reached"),
        ]));

        let result = retrying.generate_with_retry(&request()).await;

        assert_eq!(result, GenerationResult::Text("segunda tentativa".into()));
        assert_eq!(retrying.inner().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_then_success() {
        let retrying = RetryingGenerator::new(Script::new([Step::Hang, text("ok")]));

        let started = tokio::time::Instant::now();
        let result = retrying.generate_with_retry(&request()).await;

        assert_eq!(result, GenerationResult::Text("ok".into()));
        assert_eq!(retrying.inner().calls(), 2);
        assert!(started.elapsed() >= Duration::from_millis(7_000));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_budget_then_absent() {
        let retrying = RetryingGenerator::new(Script::new([
            Step::Hang,
            Step::Reply(GenerationResult::Absent),
            Step::Hang,
        ]));

        let result = retrying.generate_with_retry(&request()).await;

        assert_eq!(result, GenerationResult::Absent);
        assert_eq!(retrying.inner().calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn each_attempt_is_bounded_independently() {
        let retrying = RetryingGenerator::with_policy(
            Script::new([Step::Hang, Step::Hang]),
            RetryPolicy::new(2, Duration::from_millis(500)),
        );

        let started = tokio::time::Instant::now();
        let result = retrying.generate_with_retry(&request()).await;

        assert_eq!(result, GenerationResult::Absent);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1_000));
        assert!(elapsed < Duration::from_millis(1_100));
    }

    #[tokio::test]
    async fn retrying_generator_is_a_generator() {
        let retrying = RetryingGenerator::new(Script::new([text("via trait")]));
        let generator: &dyn Generator = &retrying;
        assert_eq!(
            generator.generate(&request()).await,
            GenerationResult::Text("via trait".into())
        );
    }
}
