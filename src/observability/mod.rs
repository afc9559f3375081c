//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, bundle loader, fetchers produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stderr (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`page`, `hash`, `token`) on every navigation log line
//! - Metrics go through the `metrics` facade; without an installed recorder they are no-ops
//! - The exporter is opt-in from configuration

pub mod logging;
pub mod metrics;
