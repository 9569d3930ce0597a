//! Prometheus metrics for the HTTP surface.
//!
//! Recording goes through the `metrics` facade, so calls are no-ops until
//! [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::MetricsSettings;

/// Request counter, labelled by `operation` and `status`.
pub const REQUESTS_TOTAL: &str = "order_http_requests_total";
/// Request latency histogram, labelled by `operation`.
pub const REQUEST_DURATION: &str = "order_http_request_duration_seconds";

/// Latency buckets from 1ms to 5s.
const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Start the Prometheus exporter serving `/metrics` on `settings.listen_addr`.
///
/// # Errors
///
/// Returns an error if the address is invalid or the exporter fails to start
/// (e.g., port already in use).
pub fn init_metrics(settings: &MetricsSettings) -> Result<(), MetricsError> {
    let addr: SocketAddr = settings.listen_addr.parse().map_err(|e| {
        MetricsError::Configuration(format!("invalid listen_addr '{}': {e}", settings.listen_addr))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets(LATENCY_BUCKETS)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(%addr, "Prometheus metrics exporter started");
    Ok(())
}

/// Record one handled request.
///
/// # Arguments
///
/// * `operation` - Handler name (e.g., `"create"`, `"get"`)
/// * `status` - HTTP status code returned
/// * `elapsed` - Time spent in the handler
pub fn record_request(operation: &'static str, status: u16, elapsed: Duration) {
    counter!(
        REQUESTS_TOTAL,
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(REQUEST_DURATION, "operation" => operation).record(elapsed.as_secs_f64());
}
