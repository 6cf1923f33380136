/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to the history table and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};

/// A persisted translation record.
///
/// Records are immutable after creation; the only mutation the system knows
/// is deletion by id or a full wipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Database id, assigned on insert and never reused
    pub id: i64,
    /// Original text
    pub source_text: String,
    /// Text returned by the translation provider
    pub translated_text: String,
    /// Source language code
    pub from_lang: String,
    /// Target language code
    pub to_lang: String,
    /// Model that produced the translation, if recorded
    pub model: Option<String>,
    /// Prompt that was sent, if recorded
    pub prompt: Option<String>,
    /// Epoch milliseconds, stamped once at insertion
    pub created_at: i64,
}

/// A record ready for insertion: everything but the id, which the
/// database assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTranslationRecord {
    /// Original text
    pub source_text: String,
    /// Text returned by the translation provider
    pub translated_text: String,
    /// Source language code
    pub from_lang: String,
    /// Target language code
    pub to_lang: String,
    /// Model that produced the translation, if recorded
    pub model: Option<String>,
    /// Prompt that was sent, if recorded
    pub prompt: Option<String>,
    /// Epoch milliseconds, stamped by the history store
    pub created_at: i64,
}

/// Caller-side draft of a translation: what a flow knows before the history
/// store stamps the timestamp and the database assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDraft {
    /// Original text
    pub source_text: String,
    /// Text returned by the translation provider
    pub translated_text: String,
    /// Source language code
    pub from_lang: String,
    /// Target language code
    pub to_lang: String,
    /// Model that produced the translation, if known
    pub model: Option<String>,
    /// Prompt that was sent, if known
    pub prompt: Option<String>,
}

impl TranslationDraft {
    /// Create a draft with the required fields
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        from_lang: impl Into<String>,
        to_lang: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            from_lang: from_lang.into(),
            to_lang: to_lang.into(),
            model: None,
            prompt: None,
        }
    }

    /// Attach the model name that produced the translation
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach the prompt that was sent
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Stamp the draft with a creation timestamp, producing an insertable row
    pub fn stamped(self, created_at: i64) -> NewTranslationRecord {
        NewTranslationRecord {
            source_text: self.source_text,
            translated_text: self.translated_text,
            from_lang: self.from_lang,
            to_lang: self.to_lang,
            model: self.model,
            prompt: self.prompt,
            created_at,
        }
    }
}
