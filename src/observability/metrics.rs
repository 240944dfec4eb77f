//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vary_rewrites_total` (counter): processed responses by `outcome`
//!   (untouched, replaced, filtered, removed)
//! - `vary_rewrite_errors_total` (counter): skipped rewrites by `kind`
//!
//! # Design Decisions
//! - Recording is a no-op until `init_metrics` installs the exporter

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one post-processed response.
pub fn record_vary_rewrite(outcome: &'static str) {
    metrics::counter!("vary_rewrites_total", "outcome" => outcome).increment(1);
}

/// Count one rewrite that had to be skipped.
pub fn record_vary_error(kind: &'static str) {
    metrics::counter!("vary_rewrite_errors_total", "kind" => kind).increment(1);
}
