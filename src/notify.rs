//! Change notification bus. After a successful mutation the provider pushes a
//! payload-free signal naming the address that changed; observers re-run
//! their own query in response. The bus is plain pub/sub over channels and
//! knows nothing about any UI toolkit.

use crossbeam::channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use crate::uri::{self, ResourceKind};

/// The signal delivered to watchers. Carries only the address that may have
/// changed, never row data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub address: String,
}

struct Watcher {
    address: String,
    tx: Sender<ChangeEvent>,
}

/// Registry of active watchers. Interior mutability keeps subscribe and
/// notify usable from the provider's `&self` methods.
#[derive(Default)]
pub struct ChangeNotifier {
    watchers: Mutex<Vec<Watcher>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in an address and hand back the receiving end of
    /// the signal channel. Dropping the receiver unsubscribes; the watcher
    /// entry is pruned the next time a matching change fires.
    pub fn subscribe(&self, address: impl Into<String>) -> Receiver<ChangeEvent> {
        let (tx, rx) = unbounded();
        self.watchers.lock().push(Watcher {
            address: address.into(),
            tx,
        });
        rx
    }

    /// Broadcast "data changed at `address`" to every watcher the address
    /// concerns. A collection watcher also hears about its items, matching
    /// how a listing observes the collection while an editor mutates single
    /// rows; an item watcher only hears about its own row.
    pub fn notify_change(&self, address: &str) {
        let event = ChangeEvent {
            address: address.to_string(),
        };

        let mut delivered = 0usize;
        self.watchers.lock().retain(|watcher| {
            if !covers(&watcher.address, address) {
                return true;
            }
            match watcher.tx.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                // Receiver gone; drop the watcher.
                Err(_) => false,
            }
        });

        tracing::debug!(address, delivered, "change notification");
    }

    /// Number of currently registered watchers.
    pub fn watcher_count(&self) -> usize {
        self.watchers.lock().len()
    }
}

/// Whether a watcher registered on `watched` should hear about a change at
/// `changed`. Exact matches always qualify; a collection watcher also covers
/// every item underneath it.
fn covers(watched: &str, changed: &str) -> bool {
    if watched == changed {
        return true;
    }
    matches!(uri::match_address(watched), Ok(ResourceKind::Collection))
        && changed.starts_with(watched)
        && changed.as_bytes().get(watched.len()) == Some(&b'/')
}
