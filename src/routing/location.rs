//! Navigation location (the hash) and its change signal.

use tokio::sync::watch;

use crate::routing::hash::strip_fragment;

/// Holds the raw hash fragment and notifies subscribers when it changes.
///
/// Setting the hash to its current value is not a change, mirroring how a
/// browser only fires `hashchange` for a different fragment.
#[derive(Debug)]
pub struct Location {
    tx: watch::Sender<String>,
}

impl Location {
    /// Create a location from an initial fragment (with or without `#`).
    pub fn new(initial: &str) -> Self {
        let (tx, _) = watch::channel(strip_fragment(initial).to_string());
        Self { tx }
    }

    /// Raw fragment without `#`; empty when no hash is set.
    pub fn fragment(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Set the fragment. Returns true if subscribers were signalled.
    pub fn set(&self, path: &str) -> bool {
        let path = strip_fragment(path);
        self.tx.send_if_modified(|current| {
            if current == path {
                false
            } else {
                *current = path.to_string();
                true
            }
        })
    }

    /// Replace the fragment without signalling subscribers.
    pub fn replace(&self, path: &str) {
        let path = strip_fragment(path).to_string();
        self.tx.send_if_modified(|current| {
            *current = path;
            false
        });
    }

    /// Subscribe to fragment changes. The current value is marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("")
    }
}
