//! Client-side hash router for single-page applications.
//!
//! Maps `#/path` fragments to page bundles (markup, stylesheet and module
//! script under a conventional prefix), loads them into a document, and
//! announces every completed navigation.

pub mod bundle;
pub mod config;
pub mod document;
pub mod events;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod services;

pub use config::schema::RouterConfig;
pub use events::RouterEvent;
pub use lifecycle::Shutdown;
pub use routing::{Navigation, PageId, Router};
