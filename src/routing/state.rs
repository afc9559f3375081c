//! Navigation state and request tokens.
//!
//! # States
//! - Unresolved: no page committed yet (`current_page() == None`)
//! - Loading: a load for some page holds the latest token
//! - Settled: a page is committed and nothing is in flight
//!
//! # State Transitions
//! ```text
//! begin(page)          → new token, pending = page   (unless page is already the target)
//! commit(token, page)  → current = page, pending cleared if token is latest
//! abandon(token)       → pending cleared if token is latest
//! ```
//!
//! # Design Decisions
//! - Tokens increase monotonically; only the latest issued may render
//! - A failed load never touches the committed page

use std::fmt;

use crate::routing::table::PageId;

/// Identifies one started load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationToken(u64);

impl fmt::Display for NavigationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nav-{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct PendingLoad {
    page: PageId,
    token: NavigationToken,
}

/// Currently displayed page, the hash that produced it, and the in-flight load.
#[derive(Debug, Default)]
pub struct NavigationState {
    page: Option<PageId>,
    hash: Option<String>,
    pending: Option<PendingLoad>,
    next_token: u64,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed page, `None` before the first successful resolution.
    pub fn current_page(&self) -> Option<&PageId> {
        self.page.as_ref()
    }

    /// Hash of the last committed navigation.
    pub fn current_hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Page the router is heading to: the in-flight load, else the committed page.
    pub fn target(&self) -> Option<&PageId> {
        self.pending
            .as_ref()
            .map(|p| &p.page)
            .or(self.page.as_ref())
    }

    /// Start a load for `page`. Returns `None` if `page` is already the target.
    pub fn begin(&mut self, page: &PageId) -> Option<NavigationToken> {
        if self.target() == Some(page) {
            return None;
        }
        self.next_token += 1;
        let token = NavigationToken(self.next_token);
        self.pending = Some(PendingLoad {
            page: page.clone(),
            token,
        });
        Some(token)
    }

    /// Returns true if `token` is the most recently issued in-flight token.
    pub fn is_latest(&self, token: NavigationToken) -> bool {
        self.pending.as_ref().is_some_and(|p| p.token == token)
    }

    /// Record a successful load.
    pub fn commit(&mut self, token: NavigationToken, page: PageId, hash: String) {
        if self.is_latest(token) {
            self.pending = None;
        }
        self.page = Some(page);
        self.hash = Some(hash);
    }

    /// Forget a failed or discarded load.
    pub fn abandon(&mut self, token: NavigationToken) {
        if self.is_latest(token) {
            self.pending = None;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
