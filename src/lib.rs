/*!
 * # Traduki - AI translation assistant with a local history
 *
 * A Rust library for translating text through an LLM provider and keeping
 * every translation in a local, durable history that stays consistent
 * across running instances.
 *
 * ## Features
 *
 * - Translate typed text, batch queues (.txt/.csv), OCR'd images and
 *   article vocabulary through the Gemini API
 * - Durable SQLite history with an auto-incrementing id and a
 *   creation-time index for most-recent-first reads
 * - A shared reactive history store: every mutation re-reads the top
 *   records, so the in-memory view never drifts from the database
 * - Cross-instance sync via a payload-free change signal; peers re-read
 *   the database instead of merging diffs
 * - Keyword extraction for building vocabularies from articles
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: SQLite persistence for translation records:
 *   - `database::schema`: Versioned schema and migrations
 *   - `database::connection`: Shared connection with async access
 *   - `database::repository`: Typed history operations
 * - `history`: The reactive layer over the database:
 *   - `history::store`: Cached recent records + the only write path
 *   - `history::notifier`: Change fan-out to peer instances
 * - `translation`: Translation service and batch flows
 * - `providers`: Client implementations for translation backends
 * - `article`: Article retrieval for the link-vocab flow
 * - `keywords`: Deterministic keyword extraction
 * - `ocr`: Image text recognition via an external engine
 * - `languages`: The closed UI language list and code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod article;
pub mod database;
pub mod errors;
pub mod history;
pub mod keywords;
pub mod languages;
pub mod ocr;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{HistoryRepository, NewTranslationRecord, TranslationDraft, TranslationRecord};
pub use errors::{AppError, FetchError, OcrError, ProviderError, StorageError, TranslationError};
pub use history::{ChangeNotifier, FileNotifier, HistoryStore, LocalNotifier, NoopNotifier};
pub use keywords::{Keyword, KeywordOptions, extract_keywords};
pub use languages::{AppLanguage, language_name};
pub use translation::{BatchTranslator, TranslationService};
