//! Collaborators that report through `tracing`, for headless use.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::services::{LoadingIndicator, Notifier, Severity};

/// Loading indicator that logs transitions and counts nesting depth.
#[derive(Debug, Default)]
pub struct TracingIndicator {
    depth: AtomicUsize,
}

impl TracingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of loads currently showing the indicator.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }
}

impl LoadingIndicator for TracingIndicator {
    fn show(&self) {
        let depth = self.depth.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(depth, "Loading indicator shown");
    }

    fn hide(&self) {
        let depth = self
            .depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |d| Some(d.saturating_sub(1)))
            .unwrap_or(0)
            .saturating_sub(1);
        tracing::debug!(depth, "Loading indicator hidden");
    }
}

/// Notifier that turns toasts into log lines.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(notification = message, "Notification"),
            Severity::Warning => tracing::warn!(notification = message, "Notification"),
            Severity::Info | Severity::Success => tracing::info!(notification = message, ?severity, "Notification"),
        }
    }
}
