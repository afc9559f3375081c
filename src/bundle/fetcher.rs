//! Page markup fetchers.
//!
//! # Responsibilities
//! - Fetch a page's markup by its conventional path
//! - Report any non-success as an error the router treats as "page not found"
//!
//! # Design Decisions
//! - One trait, three sources: HTTP, a directory, and memory
//! - Fetchers impose no timeout of their own; HTTP uses the client's
//! - Paths are absolute (`/pages/P/P.html`) and resolved against the source root

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::config::{BundleConfig, BundleSource};

/// Errors raised while fetching markup.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing exists at the path.
    #[error("'{0}' not found")]
    NotFound(String),

    /// The source answered with a non-success status.
    #[error("'{path}' returned status {status}")]
    Status { path: String, status: u16 },

    /// The path escapes the source root or cannot be joined to it.
    #[error("invalid bundle path '{0}'")]
    InvalidPath(String),

    /// Reading from disk failed.
    #[error("reading '{path}' failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed before a status was received.
    #[error("request for '{path}' failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Source of page markup.
#[async_trait]
pub trait BundleFetcher: Send + Sync + std::fmt::Debug {
    /// Fetch the markup stored at `path`.
    async fn fetch_markup(&self, path: &str) -> Result<String, FetchError>;
}

/// Build the fetcher a configuration asks for.
pub fn from_config(config: &BundleConfig) -> Result<Arc<dyn BundleFetcher>, FetchError> {
    match &config.source {
        BundleSource::Directory { root } => Ok(Arc::new(DirectoryFetcher::new(root.clone()))),
        BundleSource::Http { base_url } => {
            let timeout = config.request_timeout_secs.map(Duration::from_secs);
            Ok(Arc::new(HttpFetcher::new(base_url, timeout)?))
        }
    }
}

/// Fetches markup over HTTP relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut base_url =
            Url::parse(base_url).map_err(|_| FetchError::InvalidPath(base_url.to_string()))?;
        // Url::join replaces the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| FetchError::Http {
            path: base_url.to_string(),
            source: e,
        })?;

        Ok(Self { base_url, client })
    }

    /// Absolute URL for a bundle path.
    pub fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| FetchError::InvalidPath(path.to_string()))
    }
}

#[async_trait]
impl BundleFetcher for HttpFetcher {
    async fn fetch_markup(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path)?;
        tracing::debug!(url = %url, "Fetching page markup");

        let response = self.client.get(url).send().await.map_err(|e| FetchError::Http {
            path: path.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Http {
            path: path.to_string(),
            source: e,
        })
    }
}

/// Reads markup from files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File backing a bundle path. Rejects paths leaving the root.
    pub fn file_for(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(FetchError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BundleFetcher for DirectoryFetcher {
    async fn fetch_markup(&self, path: &str) -> Result<String, FetchError> {
        let file = self.file_for(path)?;
        tracing::debug!(file = %file.display(), "Reading page markup");

        match tokio::fs::read_to_string(&file).await {
            Ok(markup) => Ok(markup),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(path.to_string()))
            }
            Err(e) => Err(FetchError::Io {
                path: path.to_string(),
                source: e,
            }),
        }
    }
}

/// In-memory markup with fetch accounting and optional per-path latency.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    pages: Mutex<HashMap<String, String>>,
    delays: Mutex<HashMap<String, Duration>>,
    counts: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store markup at `path`.
    pub fn insert(&self, path: impl Into<String>, markup: impl Into<String>) {
        self.pages
            .lock()
            .expect("memory fetcher mutex poisoned")
            .insert(path.into(), markup.into());
    }

    /// Remove markup from `path`, making later fetches fail.
    pub fn remove(&self, path: &str) {
        self.pages
            .lock()
            .expect("memory fetcher mutex poisoned")
            .remove(path);
    }

    /// Delay every fetch of `path` by `delay`.
    pub fn set_delay(&self, path: impl Into<String>, delay: Duration) {
        self.delays
            .lock()
            .expect("memory fetcher mutex poisoned")
            .insert(path.into(), delay);
    }

    /// Number of fetches issued for `path`.
    pub fn fetch_count(&self, path: &str) -> usize {
        self.counts
            .lock()
            .expect("memory fetcher mutex poisoned")
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    /// Number of fetches issued overall.
    pub fn total_fetches(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BundleFetcher for MemoryFetcher {
    async fn fetch_markup(&self, path: &str) -> Result<String, FetchError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .counts
            .lock()
            .expect("memory fetcher mutex poisoned")
            .entry(path.to_string())
            .or_default() += 1;

        let delay = self
            .delays
            .lock()
            .expect("memory fetcher mutex poisoned")
            .get(path)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.pages
            .lock()
            .expect("memory fetcher mutex poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}
