/*!
 * Change notification channels.
 *
 * A notifier fans out a single best-effort signal - "the store has changed" -
 * to every other listening handle. The signal carries no data beyond the
 * emitting handle's identity; a receiver reacts by re-reading the database,
 * never by applying a transmitted diff.
 *
 * Two transports are provided: an in-process broadcast channel for several
 * store instances inside one process, and a marker-file watch for peer
 * processes sharing one database file. Both suppress self-delivery, matching
 * a channel that only reaches *other* instances.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

/// Default capacity for the in-process broadcast channel
const BROADCAST_CAPACITY: usize = 16;

/// Default poll interval for the marker-file transport
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Marker payload written by the file transport
#[derive(Debug, Serialize, Deserialize)]
struct ChangeMarker {
    /// Message type tag; always "changed"
    #[serde(rename = "type")]
    kind: String,
    /// Identity of the emitting handle
    origin: String,
    /// Fresh value per emission so repeated emissions from one handle differ
    nonce: String,
}

/// A subscription to change events.
///
/// `changed()` resolves to `true` for every event emitted by another handle
/// and to `false` once the channel is gone. Missed events collapse into a
/// single wake-up; that is enough, because the reaction is always a full
/// re-read.
pub struct ChangeListener {
    rx: mpsc::Receiver<()>,
}

impl ChangeListener {
    /// Wait for the next change event
    pub async fn changed(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }
}

/// A channel announcing "the store has changed" to peer handles
pub trait ChangeNotifier: Send + Sync {
    /// Announce a change to every other handle. Best effort: failures are
    /// logged and swallowed, peers that miss the signal simply stay stale
    /// until the next one.
    fn emit_changed(&self);

    /// Register for change events emitted by other handles
    fn subscribe(&self) -> ChangeListener;
}

/// In-process notifier backed by a tokio broadcast channel.
///
/// One handle per store instance; `peer()` derives additional handles bound
/// to the same channel. Handles never receive their own emissions.
pub struct LocalNotifier {
    tx: broadcast::Sender<Uuid>,
    id: Uuid,
}

impl LocalNotifier {
    /// Create a notifier with a fresh channel
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx, id: Uuid::new_v4() }
    }

    /// Derive a new handle on the same channel with its own identity
    pub fn peer(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            id: Uuid::new_v4(),
        }
    }
}

impl Default for LocalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier for LocalNotifier {
    fn emit_changed(&self) {
        // Err means no subscriber is listening right now; nothing to do
        let _ = self.tx.send(self.id);
    }

    fn subscribe(&self) -> ChangeListener {
        let mut brx = self.tx.subscribe();
        let own_id = self.id;
        let (tx, rx) = mpsc::channel(1);

        tokio::spawn(async move {
            loop {
                match brx.recv().await {
                    Ok(origin) if origin == own_id => {}
                    Ok(_) => {
                        if tx.send(()).await.is_err() {
                            break;
                        }
                    }
                    // Lagged: events were dropped; one wake-up covers them all
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        if tx.send(()).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        ChangeListener { rx }
    }
}

/// Cross-process notifier backed by a marker file beside the database.
///
/// Emitting rewrites the marker with a fresh nonce; subscribers poll the
/// marker on an interval and wake when the nonce changes and the origin is
/// another handle. An unwritable marker degrades to single-instance mode.
pub struct FileNotifier {
    marker_path: PathBuf,
    poll_interval: Duration,
    id: Uuid,
}

impl FileNotifier {
    /// Create a notifier whose marker sits next to the given database file
    pub fn for_database<P: AsRef<Path>>(db_path: P) -> Self {
        let mut marker_path = db_path.as_ref().as_os_str().to_owned();
        marker_path.push(".changed");
        Self {
            marker_path: PathBuf::from(marker_path),
            poll_interval: DEFAULT_POLL_INTERVAL,
            id: Uuid::new_v4(),
        }
    }

    /// Override the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Path of the marker file
    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }

    fn read_marker(path: &Path) -> Option<ChangeMarker> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }
}

impl ChangeNotifier for FileNotifier {
    fn emit_changed(&self) {
        let marker = ChangeMarker {
            kind: "changed".to_string(),
            origin: self.id.to_string(),
            nonce: Uuid::new_v4().to_string(),
        };
        let payload = match serde_json::to_string(&marker) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to serialize change marker: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.marker_path, payload) {
            debug!(
                "Change marker not written ({}); running without cross-process sync",
                e
            );
        }
    }

    fn subscribe(&self) -> ChangeListener {
        let path = self.marker_path.clone();
        let own_id = self.id;
        let poll_interval = self.poll_interval;
        let (tx, rx) = mpsc::channel(1);

        tokio::spawn(async move {
            let own_id = own_id.to_string();
            let mut last_nonce = Self::read_marker(&path).map(|m| m.nonce);
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                let Some(marker) = Self::read_marker(&path) else {
                    continue;
                };
                if marker.kind != "changed" || last_nonce.as_deref() == Some(marker.nonce.as_str())
                {
                    continue;
                }
                last_nonce = Some(marker.nonce);
                if marker.origin == own_id {
                    continue;
                }
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });

        ChangeListener { rx }
    }
}

/// Notifier that never delivers anything: single-instance mode
pub struct NoopNotifier;

impl ChangeNotifier for NoopNotifier {
    fn emit_changed(&self) {}

    fn subscribe(&self) -> ChangeListener {
        // Sender dropped immediately: the listener ends right away
        let (_tx, rx) = mpsc::channel(1);
        ChangeListener { rx }
    }
}
