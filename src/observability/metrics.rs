//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): HTTP requests by method, path, status
//! - `gateway_request_duration_seconds` (histogram): HTTP latency
//! - `gateway_rpc_total` (counter): node RPCs by method and outcome

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged and otherwise ignored; metric updates
/// become no-ops without a recorder.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one node RPC attempt.
pub fn record_rpc(method: &'static str, ok: bool) {
    counter!(
        "gateway_rpc_total",
        "method" => method,
        "outcome" => if ok { "ok" } else { "error" },
    )
    .increment(1);
}
