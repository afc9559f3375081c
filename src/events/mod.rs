//! Router event bus.
//!
//! # Data Flow
//! ```text
//! Router (successful navigation)  → RouteChanged { page, hash }
//! Bundle loader (page revisited)  → PageReinit { page }
//!     → broadcast channel
//!     → every subscriber (page modules, analytics, breadcrumbs)
//! ```
//!
//! # Design Decisions
//! - Fixed set of typed events instead of string event names
//! - Publishing never fails; an event with no subscribers is dropped
//! - Slow subscribers lag rather than block the router

use serde::Serialize;
use tokio::sync::broadcast;

use crate::routing::table::PageId;

/// Notifications the router broadcasts to the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RouterEvent {
    /// A navigation completed and `page` is now displayed.
    RouteChanged { page: PageId, hash: String },

    /// A previously loaded page was shown again; its module should reset itself.
    PageReinit { page: PageId },
}

impl RouterEvent {
    pub fn page(&self) -> &PageId {
        match self {
            RouterEvent::RouteChanged { page, .. } | RouterEvent::PageReinit { page } => page,
        }
    }
}

/// Broadcast channel carrying [`RouterEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<RouterEvent>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RouterEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Returns the number of subscribers that received it.
    pub fn publish(&self, event: RouterEvent) -> usize {
        tracing::trace!(?event, "Publishing router event");
        self.tx.send(event).unwrap_or(0)
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
