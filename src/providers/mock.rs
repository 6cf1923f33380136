/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Succeeds with a tagged translation
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::intermittent(n)` - Fails every nth request
 *
 * Like a real backend, every behavior rejects empty input.
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a tagged translation
    Working,
    /// Always fails with an error
    Failing,
    /// Fails every nth request
    Intermittent {
        /// Every how many requests to fail
        fail_every: usize,
    },
}

/// Mock provider for testing translation flows
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Number of translate calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn translate(
        &self,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        if text.trim().is_empty() {
            return Err(ProviderError::RequestFailed(
                "empty input rejected".to_string(),
            ));
        }

        match self.behavior {
            MockBehavior::Working => Ok(format!("[{}->{}] {}", from_lang, to_lang, text)),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    Err(ProviderError::RequestFailed(format!(
                        "intermittent failure on request {}",
                        count
                    )))
                } else {
                    Ok(format!("[{}->{}] {}", from_lang, to_lang, text))
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "mock provider configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
