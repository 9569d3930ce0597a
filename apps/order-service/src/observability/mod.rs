//! Observability: structured logging and Prometheus metrics.

mod metrics;
mod tracing;

pub use self::metrics::{
    MetricsError, REQUEST_DURATION, REQUESTS_TOTAL, init_metrics, record_request,
};
pub use self::tracing::{TracingError, build_filter, init_tracing};
