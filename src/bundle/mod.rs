//! Page bundle subsystem.
//!
//! # Data Flow
//! ```text
//! PageId
//!     → paths.rs (conventional markup / stylesheet / script locations)
//!     → fetcher.rs (HTTP, directory or memory source)
//!     → loader.rs (swap markup into the container, attach assets)
//!     → registry.rs (record which assets are attached)
//!
//! Offline:
//!     RouteTable → verify.rs → one BundleCheck per page
//! ```
//!
//! # Design Decisions
//! - Only markup is fetched; stylesheet and script are attached as tags
//! - Each page's stylesheet and script tag are inserted at most once per session
//! - Fetch failures never propagate as fatal errors

pub mod fetcher;
pub mod loader;
pub mod paths;
pub mod registry;
pub mod verify;

pub use fetcher::{BundleFetcher, DirectoryFetcher, FetchError, HttpFetcher, MemoryFetcher};
pub use loader::{BundleLoader, LoadOutcome};
pub use paths::{BundleLayout, BundlePaths};
pub use registry::{BundleRegistry, LoadedAssets};
pub use verify::{verify_bundles, BundleCheck};
