/*!
 * Translation services.
 *
 * This module contains the translation functionality of the application:
 * - `translation::service`: Core translation service over a provider
 * - `translation::batch`: Queue processing with per-item failure isolation
 */

pub mod batch;
pub mod service;

// Re-export main types
pub use batch::{BatchItemStatus, BatchOutcome, BatchReport, BatchTranslator};
pub use service::TranslationService;
