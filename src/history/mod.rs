/*!
 * History module: the reactive store over the persistence layer and the
 * change-notification channel that keeps peer instances in sync.
 *
 * Peers never exchange data. A mutation announces "the store has changed"
 * and every receiver re-reads the authoritative database, so there is no
 * merge logic anywhere.
 */

// Allow dead code - history types are for library consumers
#![allow(dead_code)]

pub mod notifier;
pub mod store;

// Re-export main types
pub use notifier::{ChangeListener, ChangeNotifier, FileNotifier, LocalNotifier, NoopNotifier};
pub use store::HistoryStore;
