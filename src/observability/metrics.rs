//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relay requests by variant and outcome
//! - `relay_request_duration_seconds` (histogram): inbound latency by variant
//!
//! Outcomes are `success`, `validation_error` and `relay_failure`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::relay::{ErrorKind, RelayError};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Outcome label for a finished relay.
pub fn outcome_label(error: Option<&RelayError>) -> &'static str {
    match error.map(RelayError::kind) {
        None => "success",
        Some(ErrorKind::Validation) => "validation_error",
        Some(ErrorKind::Failure) => "relay_failure",
    }
}

/// Record one finished relay request.
pub fn record_relay(variant: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!("relay_requests_total", "variant" => variant, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "variant" => variant)
        .record(start.elapsed().as_secs_f64());
}
