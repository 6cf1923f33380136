/*!
 * Core translation service implementation.
 *
 * A thin, clonable wrapper around a provider: validate the input, call the
 * backend, hand the result to callers or straight into the history store.
 */

use std::sync::Arc;

use log::debug;

use crate::app_config::Config;
use crate::database::models::TranslationDraft;
use crate::errors::{AppError, TranslationError};
use crate::history::store::HistoryStore;
use crate::providers::{Gemini, TranslationProvider};

/// Main translation service
#[derive(Clone)]
pub struct TranslationService {
    /// Provider implementation
    provider: Arc<dyn TranslationProvider>,
}

impl TranslationService {
    /// Create a new translation service over the given provider
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self { provider }
    }

    /// Create a translation service from the application configuration
    pub fn from_config(config: &Config) -> Self {
        let provider = Gemini::new(
            config.provider.resolve_api_key(),
            config.provider.endpoint.clone(),
            config.provider.model.clone(),
            config.provider.timeout_secs,
        );
        Self::new(Arc::new(provider))
    }

    /// Name of the configured provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Model identifier of the configured provider
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Check that the provider is reachable
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        self.provider.test_connection().await?;
        Ok(())
    }

    /// Translate a single text between the given language codes
    pub async fn translate_text(
        &self,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        debug!(
            "Translating {} chars {} -> {} via {}",
            text.len(),
            from_lang,
            to_lang,
            self.provider.name()
        );

        let translated = self.provider.translate(text, from_lang, to_lang).await?;
        Ok(translated)
    }

    /// Translate a single text and record the result in the history store.
    ///
    /// Returns the assigned record id and the translated text. A provider
    /// failure leaves the history untouched; a storage failure after a
    /// successful translation propagates unchanged.
    pub async fn translate_and_record(
        &self,
        store: &HistoryStore,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<(i64, String), AppError> {
        let translated = self.translate_text(text, from_lang, to_lang).await?;

        let draft = TranslationDraft::new(text, translated.as_str(), from_lang, to_lang);
        let id = store.push(draft).await?;

        Ok((id, translated))
    }
}
