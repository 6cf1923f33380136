/*!
 * Repository layer for history database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 * Every failure surfaces as a `StorageError`; callers never see raw
 * rusqlite errors.
 */

use log::debug;
use rusqlite::{Row, params};

use crate::errors::StorageError;

use super::connection::DatabaseConnection;
use super::models::{NewTranslationRecord, TranslationRecord};

/// Repository for translation history operations
#[derive(Clone)]
pub struct HistoryRepository {
    /// Database connection
    db: DatabaseConnection,
}

impl HistoryRepository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open a repository at the given database path
    pub fn open<P: AsRef<std::path::Path>>(db_path: P) -> Result<Self, StorageError> {
        let db = DatabaseConnection::new(db_path)
            .map_err(|e| StorageError::OpenFailed(e.to_string()))?;
        Ok(Self::new(db))
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self, StorageError> {
        let db = DatabaseConnection::new_default()
            .map_err(|e| StorageError::OpenFailed(e.to_string()))?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseConnection::new_in_memory()
            .map_err(|e| StorageError::OpenFailed(e.to_string()))?;
        Ok(Self::new(db))
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a single record and return its assigned id
    pub async fn add_record(&self, record: NewTranslationRecord) -> Result<i64, StorageError> {
        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO translation_records (
                        source_text, translated_text, from_lang, to_lang, model, prompt, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                    params![
                        record.source_text,
                        record.translated_text,
                        record.from_lang,
                        record.to_lang,
                        record.model,
                        record.prompt,
                        record.created_at,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))
    }

    /// Insert a batch of records in one transaction.
    ///
    /// All-or-nothing: if any insert fails the transaction rolls back and no
    /// row from the batch is committed. Returns the assigned ids in input
    /// order.
    pub async fn add_records_bulk(
        &self,
        records: Vec<NewTranslationRecord>,
    ) -> Result<Vec<i64>, StorageError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        self.db
            .transaction_async(move |tx| {
                let mut ids = Vec::with_capacity(records.len());
                for record in records {
                    tx.execute(
                        r#"
                        INSERT INTO translation_records (
                            source_text, translated_text, from_lang, to_lang, model, prompt, created_at
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                        "#,
                        params![
                            record.source_text,
                            record.translated_text,
                            record.from_lang,
                            record.to_lang,
                            record.model,
                            record.prompt,
                            record.created_at,
                        ],
                    )?;
                    ids.push(tx.last_insert_rowid());
                }
                Ok(ids)
            })
            .await
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))
    }

    /// Fetch up to `limit` records, most recent first.
    ///
    /// Ordered by `created_at` descending with id as tie-breaker, so batches
    /// sharing one timestamp still come back in a deterministic order. An
    /// empty table yields an empty vec.
    pub async fn get_recent(&self, limit: usize) -> Result<Vec<TranslationRecord>, StorageError> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, source_text, translated_text, from_lang, to_lang, model, prompt, created_at
                    FROM translation_records
                    ORDER BY created_at DESC, id DESC
                    LIMIT ?1
                    "#,
                )?;

                let rows = stmt.query_map([limit as i64], Self::parse_record_row)?;
                let records: Vec<TranslationRecord> = rows.filter_map(|r| r.ok()).collect();
                Ok(records)
            })
            .await
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))
    }

    /// Delete a record by id. Deleting a missing id is a no-op success.
    pub async fn delete_record(&self, id: i64) -> Result<(), StorageError> {
        self.db
            .execute_async(move |conn| {
                let deleted =
                    conn.execute("DELETE FROM translation_records WHERE id = ?1", [id])?;
                debug!("delete_record({}): {} row(s) removed", id, deleted);
                Ok(())
            })
            .await
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))
    }

    /// Remove every record
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.db
            .execute_async(|conn| {
                conn.execute("DELETE FROM translation_records", [])?;
                Ok(())
            })
            .await
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))
    }

    /// Total number of stored records
    pub async fn count(&self) -> Result<i64, StorageError> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM translation_records", [], |row| {
                        row.get(0)
                    })?;
                Ok(count)
            })
            .await
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))
    }

    /// Parse a full record row
    fn parse_record_row(row: &Row) -> rusqlite::Result<TranslationRecord> {
        Ok(TranslationRecord {
            id: row.get(0)?,
            source_text: row.get(1)?,
            translated_text: row.get(2)?,
            from_lang: row.get(3)?,
            to_lang: row.get(4)?,
            model: row.get(5)?,
            prompt: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}
