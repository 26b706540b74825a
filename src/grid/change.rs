//! Change Notification
//!
//! Every structural edit or write is announced once, after the source has
//! been mutated and the view rebuilt. Observers hold crossbeam receivers and
//! drain them on their own schedule.

use crossbeam_channel::{Receiver, Sender};

/// What changed in the bound source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange {
    /// The source was (re)bound or cleared
    Reset,
    /// `count` items were inserted at source `index`
    ItemsInserted { index: usize, count: usize },
    /// Items at these source indices (pre-removal, ascending) were removed
    ItemsRemoved { indices: Vec<usize> },
    /// The item at source `index` was written
    ItemReplaced { index: usize },
    /// The property definition set changed
    PropertiesChanged,
    /// Sort or filter changed; the source is untouched
    ViewChanged,
}

/// Fan-out of collection changes to subscribers
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Sender<CollectionChange>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer
    pub fn subscribe(&mut self) -> Receiver<CollectionChange> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `change` to all live subscribers, dropping disconnected ones
    pub fn notify(&mut self, change: CollectionChange) {
        tracing::trace!(?change, subscribers = self.subscribers.len(), "Collection changed");
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
