/*!
 * Database module for persistent storage of translation history.
 *
 * This module provides SQLite-based persistence for translation records:
 * an append-then-delete table keyed by an auto-incrementing id with a
 * secondary index on creation time for descending-time reads.
 */

// Allow dead code - database types are for library consumers
#![allow(dead_code)]

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{NewTranslationRecord, TranslationDraft, TranslationRecord};
pub use repository::HistoryRepository;
