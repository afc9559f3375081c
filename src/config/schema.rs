//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Path used when the location carries no hash.
    pub default_path: String,

    /// Page loaded for unknown routes and after a missing bundle.
    pub fallback_page: String,

    /// Title used for pages without an entry in `titles`.
    pub site_title: String,

    /// Route table: navigation path -> page identifier.
    pub routes: BTreeMap<String, String>,

    /// Document title per page identifier.
    pub titles: BTreeMap<String, String>,

    /// Where page bundles come from.
    pub bundles: BundleConfig,

    /// Navigation policy.
    pub navigation: NavigationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_path: "/home".to_string(),
            fallback_page: "home".to_string(),
            site_title: "Marketplace".to_string(),
            routes: default_routes(),
            titles: default_titles(),
            bundles: BundleConfig::default(),
            navigation: NavigationConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

fn default_routes() -> BTreeMap<String, String> {
    [
        ("/home", "home"),
        ("/escorts", "escort-selection"),
        ("/massage", "massage-parlours"),
        ("/about", "about"),
        ("/escort-login", "escort-login"),
        ("/escort-signup", "escort-signup"),
        ("/escort-dashboard", "escort-dashboard"),
        ("/client-request-board", "client-request-board"),
    ]
    .into_iter()
    .map(|(path, page)| (path.to_string(), page.to_string()))
    .collect()
}

fn default_titles() -> BTreeMap<String, String> {
    [
        ("home", "Home - Marketplace"),
        ("escort-selection", "Escorts - Marketplace"),
        ("massage-parlours", "Massage Parlours - Marketplace"),
        ("about", "About - Marketplace"),
        ("escort-login", "Login - Marketplace"),
        ("escort-signup", "Sign Up - Marketplace"),
        ("escort-dashboard", "Dashboard - Marketplace"),
        ("client-request-board", "Request Board - Marketplace"),
    ]
    .into_iter()
    .map(|(page, title)| (page.to_string(), title.to_string()))
    .collect()
}

/// Page bundle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Prefix of the conventional bundle paths (`{prefix}/P/P.html`).
    pub pages_prefix: String,

    /// Source the markup is fetched from.
    pub source: BundleSource,

    /// Request timeout for HTTP fetches. `None` leaves the client default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            pages_prefix: "/pages".to_string(),
            source: BundleSource::default(),
            request_timeout_secs: None,
        }
    }
}

/// Bundle source selection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BundleSource {
    /// Bundles are files below `root`.
    Directory { root: PathBuf },

    /// Bundles are served over HTTP below `base_url`.
    Http { base_url: String },
}

impl Default for BundleSource {
    fn default() -> Self {
        BundleSource::Directory {
            root: PathBuf::from("."),
        }
    }
}

/// Navigation policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Discard a load whose request token was superseded by a newer navigation.
    pub discard_stale_loads: bool,

    /// Element id of the page container.
    pub container_id: String,

    /// `data-page` attributes of the navigation items in the document.
    pub nav_items: Vec<String>,

    /// Capacity of the router event channel.
    pub event_capacity: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            discard_stale_loads: true,
            container_id: "app".to_string(),
            nav_items: vec![
                "home".to_string(),
                "escorts".to_string(),
                "massage".to_string(),
                "about".to_string(),
            ],
            event_capacity: 64,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
