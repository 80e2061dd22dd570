//! Prometheus metrics for the API server.

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vodforge_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vodforge_http_request_duration_seconds";

    // Trigger metrics
    pub const WEBHOOKS_RECEIVED_TOTAL: &str = "vodforge_webhooks_received_total";
    pub const MANIFESTS_GENERATED_TOTAL: &str = "vodforge_manifests_generated_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record an accepted encoding-finished webhook.
pub fn record_webhook_received() {
    counter!(names::WEBHOOKS_RECEIVED_TOTAL).increment(1);
}

/// Record a completed manifest generation pass.
pub fn record_manifests_generated() {
    counter!(names::MANIFESTS_GENERATED_TOTAL).increment(1);
}
