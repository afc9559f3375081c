//! Route resolution and page lifecycle.
//!
//! # Responsibilities
//! - Resolve the current hash to a page
//! - Load the page bundle into the document, once per distinct navigation
//! - Commit navigation state, highlight navigation, set the title
//! - Announce completed navigations on the event bus
//! - Recover from unknown routes, missing bundles and render failures
//!
//! # Design Decisions
//! - Unknown routes silently fall back to the home page
//! - A missing bundle redirects home once; a missing home bundle is reported, not retried
//! - Render failures leave the committed page untouched and are shown to the user
//! - The loading indicator is hidden on every exit path
//! - Only the latest navigation may render (request tokens), unless disabled in config

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::broadcast;

use crate::bundle::fetcher::BundleFetcher;
use crate::bundle::loader::{lock, BundleLoader, LoadOutcome};
use crate::bundle::paths::BundleLayout;
use crate::bundle::registry::BundleRegistry;
use crate::config::RouterConfig;
use crate::document::{Document, DocumentSnapshot};
use crate::events::{EventBus, RouterEvent};
use crate::observability::metrics;
use crate::routing::error::RouterError;
use crate::routing::hash;
use crate::routing::location::Location;
use crate::routing::state::{NavigationState, NavigationToken};
use crate::routing::table::{PageId, RouteTable};
use crate::routing::titles::PageTitles;
use crate::services::{LoadingIndicator, Notifier, Services, Severity};

/// Result of one route resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Navigation {
    /// The page was already displayed or already loading.
    Unchanged { page: PageId },

    /// The page is now displayed.
    Loaded {
        page: PageId,
        hash: String,
        /// The page had been visited before and was asked to re-initialise.
        reinitialized: bool,
    },

    /// The page's bundle was missing; the fallback page was loaded instead.
    Redirected {
        failed: PageId,
        outcome: Box<Navigation>,
    },

    /// A newer navigation took over before this one rendered.
    Superseded { page: PageId },

    /// The page could not be shown; the previous page stays current.
    Failed { page: PageId, reason: String },
}

impl Navigation {
    /// Page that is displayed as a result of this navigation, if it changed.
    pub fn loaded_page(&self) -> Option<&PageId> {
        match self {
            Navigation::Loaded { page, .. } => Some(page),
            Navigation::Redirected { outcome, .. } => outcome.loaded_page(),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Navigation::Unchanged { .. } => "unchanged",
            Navigation::Loaded { .. } => "loaded",
            Navigation::Redirected { .. } => "redirected",
            Navigation::Superseded { .. } => "superseded",
            Navigation::Failed { .. } => "failed",
        }
    }
}

enum Attempt {
    Done(Navigation),
    Missing { page: PageId, error: RouterError },
}

/// Hash router owning navigation state and the rendered document.
pub struct Router {
    table: RouteTable,
    titles: PageTitles,
    default_path: String,
    fallback: PageId,
    discard_stale: bool,
    location: Location,
    state: Mutex<NavigationState>,
    document: Mutex<Document>,
    loader: BundleLoader,
    events: EventBus,
    services: Services,
}

impl Router {
    /// Create a router from configuration.
    ///
    /// The document gets a page container and the configured navigation items.
    /// The location starts without a hash.
    pub fn new(config: &RouterConfig, fetcher: Arc<dyn BundleFetcher>) -> Self {
        let document = Document::new(config.navigation.container_id.as_str())
            .with_nav_items(config.navigation.nav_items.iter().cloned());

        Self {
            table: RouteTable::from_config(&config.routes),
            titles: PageTitles::new(&config.titles, config.site_title.as_str()),
            default_path: config.default_path.clone(),
            fallback: PageId::new(config.fallback_page.as_str()),
            discard_stale: config.navigation.discard_stale_loads,
            location: Location::default(),
            state: Mutex::new(NavigationState::new()),
            document: Mutex::new(document),
            loader: BundleLoader::new(fetcher, BundleLayout::new(config.bundles.pages_prefix.as_str())),
            events: EventBus::new(config.navigation.event_capacity),
            services: Services::new(),
        }
    }

    /// Start from an existing location hash (e.g. `#/about`).
    pub fn with_initial_hash(mut self, hash: &str) -> Self {
        self.location = Location::new(hash);
        self
    }

    /// Render into a caller-supplied document.
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Mutex::new(document);
        self
    }

    pub fn with_loading_indicator(mut self, indicator: Arc<dyn LoadingIndicator>) -> Self {
        self.services = self.services.with_loading_indicator(indicator);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.services = self.services.with_notifier(notifier);
        self
    }

    // --- Public contract ---

    /// Set the navigation hash. Resolution follows through [`Router::run`].
    pub fn navigate_to(&self, path: &str) {
        if self.location.set(path) {
            tracing::debug!(path, "Navigation requested");
        }
    }

    /// Page currently displayed; `None` until the first resolution completes.
    pub fn current_page(&self) -> Option<PageId> {
        self.state().current_page().cloned()
    }

    /// Hash of the current location without `#`, defaulting to the default path.
    pub fn current_hash(&self) -> String {
        hash::normalize(&self.location.fragment(), &self.default_path)
    }

    /// Subscribe to router events.
    pub fn subscribe(&self) -> broadcast::Receiver<RouterEvent> {
        self.events.subscribe()
    }

    pub fn route_table(&self) -> &RouteTable {
        &self.table
    }

    pub fn registry(&self) -> &BundleRegistry {
        self.loader.registry()
    }

    pub fn document(&self) -> DocumentSnapshot {
        lock(&self.document).snapshot()
    }

    // --- Resolution ---

    /// Resolve the current hash now.
    pub async fn resolve(&self) -> Navigation {
        let hash = self.current_hash();
        let page = match self.table.resolve(&hash) {
            Ok(page) => page.clone(),
            Err(e) => {
                tracing::debug!(error = %e, fallback = %self.fallback, "Unknown route, falling back");
                self.fallback.clone()
            }
        };

        let navigation = self.navigate(page, hash).await;
        metrics::record_navigation(navigation.label());
        navigation
    }

    /// Resolve once, then on every hash change until shutdown.
    ///
    /// Each resolution runs on its own task so a slow bundle does not hold up
    /// later navigations.
    pub async fn run(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let mut changes = self.location.subscribe();

        let initial = self.resolve().await;
        tracing::info!(outcome = ?initial, "Initial route resolved");

        loop {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let router = Arc::clone(&self);
                    tokio::spawn(async move {
                        router.resolve().await;
                    });
                }
                _ = shutdown.recv() => {
                    tracing::info!("Router received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    async fn navigate(&self, page: PageId, hash: String) -> Navigation {
        match self.attempt(page, hash).await {
            Attempt::Done(navigation) => navigation,
            Attempt::Missing { page, error } if page != self.fallback => {
                tracing::warn!(page = %page, error = %error, "Page bundle not found, redirecting home");
                self.location.replace(&self.default_path);

                let outcome = match self
                    .attempt(self.fallback.clone(), self.default_path.clone())
                    .await
                {
                    Attempt::Done(navigation) => navigation,
                    Attempt::Missing { page, error } => self.give_up(page, error),
                };
                Navigation::Redirected {
                    failed: page,
                    outcome: Box::new(outcome),
                }
            }
            Attempt::Missing { page, error } => self.give_up(page, error),
        }
    }

    async fn attempt(&self, page: PageId, hash: String) -> Attempt {
        let Some(token) = self.state().begin(&page) else {
            tracing::trace!(page = %page, "Page already current, skipping");
            return Attempt::Done(Navigation::Unchanged { page });
        };
        tracing::debug!(page = %page, hash = %hash, token = %token, "Loading page");

        let _loading = self.services.loading();

        let loaded = self
            .loader
            .load(&page, &self.document, &self.events, || self.is_latest(token))
            .await;

        match loaded {
            Ok(LoadOutcome::Rendered { reinitialized }) => {
                self.finish(token, &page, &hash);
                tracing::info!(page = %page, hash = %hash, reinitialized, "Navigation complete");
                Attempt::Done(Navigation::Loaded {
                    page,
                    hash,
                    reinitialized,
                })
            }
            Ok(LoadOutcome::Superseded) => {
                self.state().abandon(token);
                Attempt::Done(Navigation::Superseded { page })
            }
            Err(error @ RouterError::BundleNotFound { .. }) => {
                self.state().abandon(token);
                Attempt::Missing { page, error }
            }
            Err(error) => {
                self.state().abandon(token);
                tracing::error!(page = %page, error = %error, "Failed to render page");
                self.services
                    .notify(&format!("Failed to load page: {page}"), Severity::Error);
                Attempt::Done(Navigation::Failed {
                    page,
                    reason: error.to_string(),
                })
            }
        }
    }

    /// Commit state, refresh navigation and title, announce the change.
    fn finish(&self, token: NavigationToken, page: &PageId, hash: &str) {
        self.state().commit(token, page.clone(), hash.to_string());

        {
            let mut doc = lock(&self.document);
            for item in doc.nav_items_mut() {
                item.active = self.table.page_for_nav_item(&item.page) == Some(page);
            }
            doc.set_title(self.titles.title_for(page));
        }

        self.events.publish(RouterEvent::RouteChanged {
            page: page.clone(),
            hash: hash.to_string(),
        });
    }

    fn give_up(&self, page: PageId, error: RouterError) -> Navigation {
        tracing::error!(page = %page, error = %error, "Fallback page bundle not found");
        self.services
            .notify(&format!("Failed to load page: {page}"), Severity::Error);
        Navigation::Failed {
            page,
            reason: error.to_string(),
        }
    }

    fn is_latest(&self, token: NavigationToken) -> bool {
        !self.discard_stale || self.state().is_latest(token)
    }

    fn state(&self) -> MutexGuard<'_, NavigationState> {
        self.state.lock().expect("navigation state mutex poisoned")
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .field("current_page", &self.current_page())
            .field("hash", &self.current_hash())
            .field("services", &self.services)
            .finish()
    }
}
