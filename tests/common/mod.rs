/*!
 * Common test utilities for the traduki test suite
 */

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use traduki::database::models::TranslationDraft;
use traduki::database::repository::HistoryRepository;
use traduki::history::notifier::LocalNotifier;
use traduki::history::store::HistoryStore;

/// Opt-in test logging; set RUST_LOG to see store and notifier activity
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A store over a fresh in-memory database with an isolated notifier
pub fn in_memory_store() -> Arc<HistoryStore> {
    let repo = HistoryRepository::new_in_memory().expect("Failed to create repository");
    HistoryStore::new(repo, Arc::new(LocalNotifier::new()))
}

/// Two stores sharing one database and one notification channel,
/// simulating two open tabs
pub fn paired_stores() -> (Arc<HistoryStore>, Arc<HistoryStore>) {
    let repo = HistoryRepository::new_in_memory().expect("Failed to create repository");
    let notifier_a = LocalNotifier::new();
    let notifier_b = notifier_a.peer();

    let store_a = HistoryStore::new(repo.clone(), Arc::new(notifier_a));
    let store_b = HistoryStore::new(repo, Arc::new(notifier_b));
    (store_a, store_b)
}

/// A minimal draft for seeding
pub fn draft(source: &str) -> TranslationDraft {
    TranslationDraft::new(source, format!("[t] {}", source), "en", "de")
}

/// Wait until the predicate holds or the timeout elapses
pub async fn wait_until(timeout: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if predicate() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
