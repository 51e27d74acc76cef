//! Observability module - Prometheus request metrics.

mod metrics;

pub use metrics::{HttpMetrics, METRICS_PATH, RequestMetrics};
