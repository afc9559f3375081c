//! Bundle loading sub-protocol.
//!
//! # Responsibilities
//! - Fetch the page markup
//! - Clear the page container and swap the markup in, under one document lock
//! - Insert the page stylesheet and module script once per page
//! - Ask already-loaded page modules to re-initialise on revisits
//!
//! # Design Decisions
//! - The document lock is never held across the fetch
//! - The container is only touched once markup is in hand; a failed or
//!   superseded load leaves the previous page on screen
//! - A load that lost its token while fetching renders nothing
//! - No retries; any fetch failure is `BundleNotFound`

use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::bundle::fetcher::BundleFetcher;
use crate::bundle::paths::{BundleLayout, BundlePaths};
use crate::bundle::registry::BundleRegistry;
use crate::document::Document;
use crate::events::{EventBus, RouterEvent};
use crate::observability::metrics;
use crate::routing::error::{RouterError, RouterResult};
use crate::routing::table::PageId;

/// Result of a load that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Markup is in the container and the page's assets are attached.
    Rendered {
        /// The page's script was already attached and was asked to re-initialise.
        reinitialized: bool,
    },
    /// A newer navigation took over while the markup was in flight.
    Superseded,
}

/// Loads page bundles into a document.
#[derive(Debug)]
pub struct BundleLoader {
    fetcher: Arc<dyn BundleFetcher>,
    layout: BundleLayout,
    registry: BundleRegistry,
}

impl BundleLoader {
    pub fn new(fetcher: Arc<dyn BundleFetcher>, layout: BundleLayout) -> Self {
        Self {
            fetcher,
            layout,
            registry: BundleRegistry::new(),
        }
    }

    pub fn registry(&self) -> &BundleRegistry {
        &self.registry
    }

    /// Load `page` into `document`.
    ///
    /// `still_current` is consulted after the fetch; returning false discards
    /// the markup and yields [`LoadOutcome::Superseded`].
    pub async fn load<F>(
        &self,
        page: &PageId,
        document: &Mutex<Document>,
        events: &EventBus,
        still_current: F,
    ) -> RouterResult<LoadOutcome>
    where
        F: Fn() -> bool,
    {
        let paths = self.layout.paths(page);

        // A missing container fails before anything is fetched
        lock(document)
            .ensure_container()
            .map_err(|source| RouterError::Render {
                page: page.clone(),
                source,
            })?;

        // Fetch markup
        let started = Instant::now();
        let fetched = self.fetcher.fetch_markup(&paths.markup).await;
        metrics::record_bundle_fetch(page.as_str(), fetched.is_ok(), started);

        if !still_current() {
            tracing::debug!(page = %page, "Discarding result of superseded navigation");
            return Ok(LoadOutcome::Superseded);
        }

        let markup = fetched.map_err(|source| RouterError::BundleNotFound {
            page: page.clone(),
            source,
        })?;

        // Swap markup in and attach assets
        let reinitialized = self.render(page, &paths, markup, document)?;
        if reinitialized {
            events.publish(RouterEvent::PageReinit { page: page.clone() });
        }
        self.registry.record_visit(page);
        metrics::record_loaded_pages(self.registry.loaded_pages());

        Ok(LoadOutcome::Rendered { reinitialized })
    }

    /// Returns true if the page script was already attached.
    fn render(
        &self,
        page: &PageId,
        paths: &BundlePaths,
        markup: String,
        document: &Mutex<Document>,
    ) -> RouterResult<bool> {
        let mut doc = lock(document);

        doc.clear_container()
            .and_then(|()| doc.set_container_markup(markup))
            .map_err(|source| RouterError::Render {
                page: page.clone(),
                source,
            })?;

        if self.registry.mark_stylesheet(page) && !doc.has_stylesheet(&paths.stylesheet) {
            doc.append_stylesheet(paths.stylesheet.as_str());
        }

        if self.registry.mark_script(page) {
            if !doc.has_script(&paths.script) {
                doc.append_module_script(paths.script.as_str());
            }
            tracing::debug!(page = %page, script = %paths.script, "Attached page module");
            Ok(false)
        } else {
            Ok(true)
        }
    }
}

pub(crate) fn lock(document: &Mutex<Document>) -> std::sync::MutexGuard<'_, Document> {
    document.lock().expect("document mutex poisoned")
}
