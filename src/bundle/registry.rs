//! Registry of page assets inserted into the document.
//!
//! # Responsibilities
//! - Remember, per page, whether its stylesheet link and script tag exist
//! - Count visits per page
//!
//! # Design Decisions
//! - The registry, not the document, is the source of truth for "already loaded"
//! - Marking is test-and-set, so concurrent loads insert each tag once

use dashmap::DashMap;
use serde::Serialize;

use crate::routing::table::PageId;

/// Assets recorded for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadedAssets {
    pub stylesheet: bool,
    pub script: bool,
    /// Successful renders of this page.
    pub visits: u32,
}

/// Per-page flags for inserted stylesheet and script tags.
#[derive(Debug, Default)]
pub struct BundleRegistry {
    pages: DashMap<PageId, LoadedAssets>,
}

impl BundleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the stylesheet as inserted. Returns true the first time only.
    pub fn mark_stylesheet(&self, page: &PageId) -> bool {
        let mut entry = self.pages.entry(page.clone()).or_default();
        !std::mem::replace(&mut entry.stylesheet, true)
    }

    /// Record the script as inserted. Returns true the first time only.
    pub fn mark_script(&self, page: &PageId) -> bool {
        let mut entry = self.pages.entry(page.clone()).or_default();
        !std::mem::replace(&mut entry.script, true)
    }

    /// Count a render of `page`. Returns the new visit count.
    pub fn record_visit(&self, page: &PageId) -> u32 {
        let mut entry = self.pages.entry(page.clone()).or_default();
        entry.visits += 1;
        entry.visits
    }

    pub fn get(&self, page: &PageId) -> Option<LoadedAssets> {
        self.pages.get(page).map(|r| *r.value())
    }

    pub fn is_script_loaded(&self, page: &PageId) -> bool {
        self.get(page).is_some_and(|a| a.script)
    }

    pub fn is_stylesheet_loaded(&self, page: &PageId) -> bool {
        self.get(page).is_some_and(|a| a.stylesheet)
    }

    /// Number of pages with their script attached.
    pub fn loaded_pages(&self) -> usize {
        self.pages.iter().filter(|r| r.value().script).count()
    }

    /// Sorted copy of all entries.
    pub fn snapshot(&self) -> Vec<(PageId, LoadedAssets)> {
        let mut entries: Vec<_> = self
            .pages
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
