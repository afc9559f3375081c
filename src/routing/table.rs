//! Route table and page identifiers.
//!
//! # Responsibilities
//! - Store the path → page mapping
//! - Look up the page for a normalized hash path
//! - Map navigation item attributes back to pages
//!
//! # Design Decisions
//! - Immutable after construction (shared without locks)
//! - O(1) lookup via HashMap
//! - Explicit `UnknownRoute` rather than a silent default; the router decides the fallback

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::routing::error::RouterError;

/// Identifier of a page bundle, e.g. `escort-selection`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<&str> for PageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Mapping from navigation path to page identifier.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, PageId>,
}

impl RouteTable {
    /// Build a table from configured `path -> page` pairs.
    pub fn from_config(routes: &BTreeMap<String, String>) -> Self {
        Self {
            routes: routes
                .iter()
                .map(|(path, page)| (path.clone(), PageId::new(page.as_str())))
                .collect(),
        }
    }

    /// Look up the page for a path.
    pub fn lookup(&self, path: &str) -> Option<&PageId> {
        self.routes.get(path)
    }

    /// Resolve a path, reporting unmapped paths as `UnknownRoute`.
    pub fn resolve(&self, path: &str) -> Result<&PageId, RouterError> {
        self.lookup(path)
            .ok_or_else(|| RouterError::UnknownRoute(path.to_string()))
    }

    /// Page a navigation item's `data-page` attribute points at.
    ///
    /// Items carry the path without its leading slash (`data-page="escorts"`).
    pub fn page_for_nav_item(&self, attr: &str) -> Option<&PageId> {
        self.lookup(&format!("/{}", attr.trim_start_matches('/')))
    }

    /// Distinct page identifiers, sorted.
    pub fn pages(&self) -> Vec<PageId> {
        let mut pages: Vec<PageId> = self.routes.values().cloned().collect();
        pages.sort();
        pages.dedup();
        pages
    }

    /// All `(path, page)` entries sorted by path.
    pub fn entries(&self) -> Vec<(&str, &PageId)> {
        let mut entries: Vec<_> = self
            .routes
            .iter()
            .map(|(path, page)| (path.as_str(), page))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Returns true if some route targets `page`.
    pub fn contains_page(&self, page: &PageId) -> bool {
        self.routes.values().any(|p| p == page)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
