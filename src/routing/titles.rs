//! Document title lookup.

use std::collections::{BTreeMap, HashMap};

use crate::routing::table::PageId;

/// Static page → title map with a generic fallback.
#[derive(Debug, Clone)]
pub struct PageTitles {
    titles: HashMap<PageId, String>,
    site_title: String,
}

impl PageTitles {
    pub fn new(titles: &BTreeMap<String, String>, site_title: impl Into<String>) -> Self {
        Self {
            titles: titles
                .iter()
                .map(|(page, title)| (PageId::new(page.as_str()), title.clone()))
                .collect(),
            site_title: site_title.into(),
        }
    }

    /// Title for `page`, or the site title for unknown pages.
    pub fn title_for(&self, page: &PageId) -> &str {
        self.titles
            .get(page)
            .map(String::as_str)
            .unwrap_or(&self.site_title)
    }

    pub fn site_title(&self) -> &str {
        &self.site_title
    }
}
