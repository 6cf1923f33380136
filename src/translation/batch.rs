/*!
 * Batch translation processing.
 *
 * This module contains functionality for processing translation queues,
 * with support for concurrency, progress tracking, and error handling.
 * One item's failure never aborts the rest of the queue; successful items
 * are recorded with a single bulk write so the whole run shares one
 * history timestamp.
 */

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use log::{error, info};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use walkdir::WalkDir;

use crate::database::models::TranslationDraft;
use crate::errors::AppError;
use crate::history::store::HistoryStore;

use super::service::TranslationService;

/// Default number of concurrent provider requests
const DEFAULT_CONCURRENT_REQUESTS: usize = 3;

/// Outcome status of one queue item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchItemStatus {
    /// The item was translated and recorded
    Translated,
    /// The item failed; the rest of the queue proceeded without it
    Failed {
        /// Provider or validation error message
        message: String,
    },
}

/// Per-item result of a batch run, in input order
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Position in the input queue
    pub index: usize,
    /// The queued source text
    pub source_text: String,
    /// What happened to this item
    pub status: BatchItemStatus,
}

/// Result of a whole batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Per-item outcomes, in input order
    pub outcomes: Vec<BatchOutcome>,
    /// Ids assigned to the recorded items, in input order
    pub record_ids: Vec<i64>,
}

impl BatchReport {
    /// Number of successfully translated items
    pub fn translated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == BatchItemStatus::Translated)
            .count()
    }

    /// Number of failed items
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.translated_count()
    }
}

/// Batch translator for processing queues of texts
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,

    /// Maximum number of concurrent requests
    max_concurrent_requests: usize,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: TranslationService) -> Self {
        Self {
            service,
            max_concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
        }
    }

    /// Override the request concurrency
    pub fn with_concurrency(mut self, max_concurrent_requests: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests.max(1);
        self
    }

    /// Translate every queued text and record the successes.
    ///
    /// Items are translated with bounded concurrency; each failure is logged
    /// and flagged while the remaining items proceed. All successful items
    /// are recorded through one `push_many`, so they share one timestamp and
    /// peers get a single change announcement. A storage failure, by
    /// contrast, aborts the run: nothing is recorded and the error
    /// propagates.
    pub async fn translate_all(
        &self,
        store: &HistoryStore,
        queue: &[String],
        from_lang: &str,
        to_lang: &str,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<BatchReport, AppError> {
        if queue.is_empty() {
            return Ok(BatchReport {
                outcomes: Vec::new(),
                record_ids: Vec::new(),
            });
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let total = queue.len();
        let processed = Arc::new(AtomicUsize::new(0));

        // Translate concurrently, then restore input order
        let mut results = stream::iter(queue.iter().cloned().enumerate())
            .map(|(index, source_text)| {
                let service = self.service.clone();
                let semaphore = semaphore.clone();
                let processed = processed.clone();
                let progress_callback = progress_callback.clone();
                let from_lang = from_lang.to_string();
                let to_lang = to_lang.to_string();

                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore closed");

                    let result = service
                        .translate_text(&source_text, &from_lang, &to_lang)
                        .await;

                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);

                    (index, source_text, result)
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|(index, _, _)| *index);

        let mut outcomes = Vec::with_capacity(total);
        let mut drafts = Vec::new();

        for (index, source_text, result) in results {
            match result {
                Ok(translated_text) => {
                    drafts.push(TranslationDraft::new(
                        source_text.as_str(),
                        translated_text,
                        from_lang,
                        to_lang,
                    ));
                    outcomes.push(BatchOutcome {
                        index,
                        source_text,
                        status: BatchItemStatus::Translated,
                    });
                }
                Err(e) => {
                    error!("Failed to translate queue item {}: {}", index + 1, e);
                    outcomes.push(BatchOutcome {
                        index,
                        source_text,
                        status: BatchItemStatus::Failed {
                            message: e.to_string(),
                        },
                    });
                }
            }
        }

        let record_ids = store.push_many(drafts).await?;

        info!(
            "Batch finished: {} translated, {} failed",
            record_ids.len(),
            total - record_ids.len()
        );

        Ok(BatchReport {
            outcomes,
            record_ids,
        })
    }
}

/// Split plain text into one queue item per non-empty line
pub fn parse_plain_text(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Extract the first column of a CSV, skipping a leading "text" header
pub fn parse_csv(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(|c| c == ',' || c == ';')
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        })
        .filter(|cell| !cell.is_empty())
        .filter(|cell| cell.to_lowercase() != "text")
        .collect()
}

/// Read a queue from a .txt or .csv file
pub fn load_queue_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file: {:?}", path))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let items = match extension.as_str() {
        "csv" => parse_csv(&text),
        _ => parse_plain_text(&text),
    };

    Ok(items)
}

/// Collect queue items from files and directories.
///
/// Directories are walked recursively for .txt/.csv files; files are loaded
/// whatever their extension, like a direct upload.
pub fn collect_queue<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>> {
    let mut queue = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let ext = entry
                    .path()
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.to_lowercase())
                    .unwrap_or_default();
                if ext == "txt" || ext == "csv" {
                    queue.extend(load_queue_from_file(entry.path())?);
                }
            }
        } else {
            queue.extend(load_queue_from_file(path)?);
        }
    }

    Ok(queue)
}
