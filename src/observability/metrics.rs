//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_navigations_total` (counter): navigations by outcome
//! - `router_bundle_fetch_duration_seconds` (histogram): markup fetch latency by result
//! - `router_bundle_failures_total` (counter): missing bundles by page
//! - `router_pages_loaded` (gauge): pages whose module is attached
//!
//! # Design Decisions
//! - Page labels are bounded by the route table
//! - Exporter failures are logged, never fatal

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count a finished navigation.
pub fn record_navigation(outcome: &'static str) {
    metrics::counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

/// Record a markup fetch.
pub fn record_bundle_fetch(page: &str, ok: bool, started: Instant) {
    let result = if ok { "ok" } else { "error" };
    metrics::histogram!("router_bundle_fetch_duration_seconds", "result" => result)
        .record(started.elapsed().as_secs_f64());
    if !ok {
        metrics::counter!("router_bundle_failures_total", "page" => page.to_string()).increment(1);
    }
}

/// Update the number of pages with an attached module.
pub fn record_loaded_pages(count: usize) {
    metrics::gauge!("router_pages_loaded").set(count as f64);
}
