//! Optional collaborators the router reports to.
//!
//! # Design Decisions
//! - Both services are optional; an absent service is a no-op
//! - The loading indicator is driven through a guard so `hide` runs on every exit path
//! - Implementations must be cheap and non-blocking; they run on the navigation task

pub mod logging;

use std::sync::Arc;

use serde::Serialize;

pub use logging::{TracingIndicator, TracingNotifier};

/// Global loading indicator.
pub trait LoadingIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient user-visible notifications (toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// The collaborators a router was given.
#[derive(Clone, Default)]
pub struct Services {
    loading: Option<Arc<dyn LoadingIndicator>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl Services {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loading_indicator(mut self, indicator: Arc<dyn LoadingIndicator>) -> Self {
        self.loading = Some(indicator);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Show the loading indicator until the returned guard is dropped.
    pub fn loading(&self) -> LoadingGuard {
        if let Some(indicator) = &self.loading {
            indicator.show();
        }
        LoadingGuard {
            indicator: self.loading.clone(),
        }
    }

    /// Send a notification if a notifier is present.
    pub fn notify(&self, message: &str, severity: Severity) {
        match &self.notifier {
            Some(notifier) => notifier.notify(message, severity),
            None => tracing::debug!(notification = message, ?severity, "No notifier registered, dropping notification"),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("loading", &self.loading.is_some())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

/// Hides the loading indicator when dropped.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct LoadingGuard {
    indicator: Option<Arc<dyn LoadingIndicator>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Some(indicator) = &self.indicator {
            indicator.hide();
        }
    }
}
