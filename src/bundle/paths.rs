//! Conventional bundle locations.

use crate::routing::table::PageId;

/// Derives `{prefix}/P/P.{html,css,js}` for a page `P`.
#[derive(Debug, Clone)]
pub struct BundleLayout {
    prefix: String,
}

/// Locations of one page's bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePaths {
    pub markup: String,
    pub stylesheet: String,
    pub script: String,
}

impl BundleLayout {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn paths(&self, page: &PageId) -> BundlePaths {
        let base = format!("{}/{page}/{page}", self.prefix);
        BundlePaths {
            markup: format!("{base}.html"),
            stylesheet: format!("{base}.css"),
            script: format!("{base}.js"),
        }
    }
}

impl Default for BundleLayout {
    fn default() -> Self {
        Self::new("/pages")
    }
}
