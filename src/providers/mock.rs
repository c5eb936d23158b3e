/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with a translated text
 * - `MockProvider::intermittent()` - Fails every Nth request
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::echo()` / `MockProvider::placeholder()` - Degenerate output
 *
 * Clones share one request counter, so a test can hand a clone to the
 * resolver and still count the calls it received.
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{LookupRequest, LookupResponse, Provider, ProviderStage};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Answers with no usable result
    Empty,
    /// Returns the input unchanged
    Echo,
    /// Returns the input wrapped in brackets
    Placeholder,
    /// Simulates slow response (for concurrency testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing resolver behavior
#[derive(Debug)]
pub struct MockProvider {
    name: String,
    stage: ProviderStage,
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&LookupRequest) -> String>,
    /// Target languages the mock accepts; all when unset
    targets: Option<Vec<String>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(stage: ProviderStage, behavior: MockBehavior) -> Self {
        Self {
            name: format!("mock-{}", stage),
            stage,
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
            targets: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working(stage: ProviderStage) -> Self {
        Self::new(stage, MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(stage: ProviderStage, fail_every: usize) -> Self {
        Self::new(stage, MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing(stage: ProviderStage) -> Self {
        Self::new(stage, MockBehavior::Failing)
    }

    /// Create a mock that echoes its input
    pub fn echo(stage: ProviderStage) -> Self {
        Self::new(stage, MockBehavior::Echo)
    }

    /// Create a mock that answers with a bracketed placeholder
    pub fn placeholder(stage: ProviderStage) -> Self {
        Self::new(stage, MockBehavior::Placeholder)
    }

    /// Create a mock that waits before answering
    pub fn slow(stage: ProviderStage, delay_ms: u64) -> Self {
        Self::new(stage, MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&LookupRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Restrict the target languages the mock reports as supported
    pub fn with_targets(mut self, targets: &[&str]) -> Self {
        self.targets = Some(targets.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Rename the provider, e.g. to tell two mocks of one stage apart
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of requests received so far, across all clones
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn translated(&self, request: &LookupRequest) -> LookupResponse {
        let text = match self.custom_response {
            Some(generator) => generator(request),
            None => format!("translated {}", request.text),
        };
        LookupResponse {
            text,
            pronunciation: None,
            part_of_speech: None,
            example: None,
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            stage: self.stage,
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_response: self.custom_response,
            targets: self.targets.clone(),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn stage(&self) -> ProviderStage {
        self.stage
    }

    fn supports_target(&self, target_language: &str) -> bool {
        self.targets
            .as_ref()
            .is_none_or(|targets| targets.iter().any(|t| t == target_language))
    }

    async fn complete(&self, request: LookupRequest) -> Result<LookupResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.translated(&request)),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(self.translated(&request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Simulated provider failure".to_string(),
            )),

            MockBehavior::Empty => Err(ProviderError::NoResult(format!(
                "Nothing found for '{}'",
                request.text
            ))),

            MockBehavior::Echo => Ok(LookupResponse::text(request.text)),

            MockBehavior::Placeholder => Ok(LookupResponse::text(format!("[{}]", request.text))),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.translated(&request))
            }
        }
    }
}
