/*!
 * Provider implementations for translation backends.
 *
 * This module contains the client used to reach the LLM text-generation
 * endpoint and the trait that lets flows stay agnostic of which backend
 * produced a translation.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably by the translation
/// service and the batch flows.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Short identifier for logs and record metadata
    fn name(&self) -> &str;

    /// Model identifier this provider is configured with
    fn model(&self) -> &str;

    /// Translate `text` between the given language codes
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod gemini;
pub mod mock;

pub use gemini::Gemini;
pub use mock::MockProvider;
