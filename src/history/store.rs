/*!
 * Reactive history store.
 *
 * A shared in-memory view of the most recent translation records plus the
 * only sanctioned write path to the database. Every mutation follows the
 * same shape: write, re-read the top records, announce the change. Peer
 * instances react to the announcement by running the same re-read, so the
 * cache can never drift from the database's recent view.
 */

use std::sync::Arc;

use log::warn;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use crate::database::models::{TranslationDraft, TranslationRecord};
use crate::database::repository::HistoryRepository;
use crate::errors::StorageError;

use super::notifier::ChangeNotifier;

/// How many records the in-memory view holds per read
pub const RECENT_LIMIT: usize = 200;

/// Mutable store state
struct HistoryState {
    items: Vec<TranslationRecord>,
    loading: bool,
    is_ready: bool,
}

/// Reactive cache + mutation API over the history database
pub struct HistoryStore {
    repo: HistoryRepository,
    notifier: Arc<dyn ChangeNotifier>,
    state: RwLock<HistoryState>,
}

impl HistoryStore {
    /// Create a store over the given repository and notifier.
    ///
    /// The change listener is registered here: for the lifetime of the store
    /// every event emitted by a peer triggers a refresh. Must be called from
    /// within a tokio runtime.
    pub fn new(repo: HistoryRepository, notifier: Arc<dyn ChangeNotifier>) -> Arc<Self> {
        let store = Arc::new(Self {
            repo,
            notifier,
            state: RwLock::new(HistoryState {
                items: Vec::new(),
                loading: false,
                is_ready: false,
            }),
        });
        store.spawn_change_listener();
        store
    }

    /// The repository this store writes through
    pub fn repository(&self) -> &HistoryRepository {
        &self.repo
    }

    /// Snapshot of the cached records, most recent first
    pub fn items(&self) -> Vec<TranslationRecord> {
        self.state.read().items.clone()
    }

    /// Whether a read is currently in flight
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Whether the first load has completed
    pub fn is_ready(&self) -> bool {
        self.state.read().is_ready
    }

    /// First load. A no-op once ready, so every consumer may call it on
    /// startup without triggering redundant reads.
    pub async fn init(&self) -> Result<(), StorageError> {
        if self.is_ready() {
            return Ok(());
        }
        self.reload().await
    }

    /// Unconditionally re-read the recent records and replace the cache
    pub async fn refresh(&self) -> Result<(), StorageError> {
        self.reload().await
    }

    /// Persist one translation and return its assigned id.
    ///
    /// The creation timestamp is stamped here, at mutation time. There is no
    /// optimistic insert: the caller sees the new record only after the
    /// cache has been rebuilt from the database.
    pub async fn push(&self, draft: TranslationDraft) -> Result<i64, StorageError> {
        let now = chrono::Utc::now().timestamp_millis();
        let id = self.repo.add_record(draft.stamped(now)).await?;
        self.refresh().await?;
        self.notifier.emit_changed();
        Ok(id)
    }

    /// Persist a batch of translations in one transaction.
    ///
    /// The whole batch shares a single timestamp, is inserted all-or-nothing,
    /// triggers one refresh and one change announcement. Returns the assigned
    /// ids in input order.
    pub async fn push_many(
        &self,
        drafts: Vec<TranslationDraft>,
    ) -> Result<Vec<i64>, StorageError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let now = chrono::Utc::now().timestamp_millis();
        let rows = drafts.into_iter().map(|d| d.stamped(now)).collect();
        let ids = self.repo.add_records_bulk(rows).await?;
        self.refresh().await?;
        self.notifier.emit_changed();
        Ok(ids)
    }

    /// Delete one record by id. Deleting an id that is already gone succeeds.
    pub async fn remove(&self, id: i64) -> Result<(), StorageError> {
        self.repo.delete_record(id).await?;
        self.refresh().await?;
        self.notifier.emit_changed();
        Ok(())
    }

    /// Wipe the entire history
    pub async fn reset(&self) -> Result<(), StorageError> {
        self.repo.clear_all().await?;
        self.refresh().await?;
        self.notifier.emit_changed();
        Ok(())
    }

    /// Re-read the top records. On failure the cache falls back to an empty,
    /// non-ready state and the error propagates; there is no silent retry.
    async fn reload(&self) -> Result<(), StorageError> {
        self.state.write().loading = true;

        match self.repo.get_recent(RECENT_LIMIT).await {
            Ok(items) => {
                let mut state = self.state.write();
                state.items = items;
                state.loading = false;
                state.is_ready = true;
                Ok(())
            }
            Err(e) => {
                let mut state = self.state.write();
                state.items.clear();
                state.loading = false;
                state.is_ready = false;
                Err(e)
            }
        }
    }

    /// Refresh on every change event from a peer. The task holds only a weak
    /// reference, so dropping the store ends it.
    fn spawn_change_listener(self: &Arc<Self>) {
        let mut listener = self.notifier.subscribe();
        let weak = Arc::downgrade(self);

        tokio::spawn(async move {
            while listener.changed().await {
                let Some(store) = weak.upgrade() else { break };
                if let Err(e) = store.refresh().await {
                    warn!("Refresh after change event failed: {}", e);
                }
            }
        });
    }
}

/// Process-wide store instance
static GLOBAL_STORE: OnceCell<Arc<HistoryStore>> = OnceCell::new();

/// Install the process-wide store. Fails if one is already installed.
pub fn install_global(store: Arc<HistoryStore>) -> Result<(), Arc<HistoryStore>> {
    GLOBAL_STORE.set(store)
}

/// The process-wide store, if one has been installed
pub fn global() -> Option<Arc<HistoryStore>> {
    GLOBAL_STORE.get().cloned()
}
