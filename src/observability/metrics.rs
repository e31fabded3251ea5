//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_decisions_total` (counter): routing decisions by outcome
//! - `edge_upstream_failures_total` (counter): failed upstream forwards
//!
//! # Design Decisions
//! - Uses the metrics facade; recording is a no-op until an exporter is
//!   installed, so the library stays usable without one
//! - Prometheus exporter on its own listener, outside the intercepted
//!   surface

use std::net::SocketAddr;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and register metric descriptions.
pub fn init_metrics(addr: SocketAddr) {
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::error!(error = %e, "Failed to install metrics exporter");
        return;
    }

    describe_counter!("edge_decisions_total", "Routing decisions by outcome");
    describe_counter!("edge_upstream_failures_total", "Failed upstream forwards");

    tracing::info!(address = %addr, "Metrics exporter listening");
}

/// Record a routing decision outcome.
pub fn record_decision(decision: &'static str) {
    counter!("edge_decisions_total", "decision" => decision).increment(1);
}

/// Record a failed forward to the upstream origin.
pub fn record_upstream_failure() {
    counter!("edge_upstream_failures_total").increment(1);
}
