//! Backend call metrics
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! host process installs a recorder.
//!
//! - `logvault_backend_requests_total{operation, status}`
//! - `logvault_backend_errors_total{operation, error_type}`
//! - `logvault_backend_duration_seconds{operation}`
//! - `logvault_template_setup_total{outcome}`

use std::time::Duration;

pub fn record_backend_duration(operation: &'static str, duration: Duration) {
    metrics::histogram!(
        "logvault_backend_duration_seconds",
        "operation" => operation,
    )
    .record(duration.as_secs_f64());
}

pub fn record_backend_success(operation: &'static str) {
    metrics::counter!(
        "logvault_backend_requests_total",
        "operation" => operation,
        "status" => "ok",
    )
    .increment(1);
}

pub fn record_backend_error(operation: &'static str, error_type: &'static str) {
    metrics::counter!(
        "logvault_backend_requests_total",
        "operation" => operation,
        "status" => "error",
    )
    .increment(1);

    metrics::counter!(
        "logvault_backend_errors_total",
        "operation" => operation,
        "error_type" => error_type,
    )
    .increment(1);
}

pub fn record_template_setup(outcome: &'static str) {
    metrics::counter!("logvault_template_setup_total", "outcome" => outcome).increment(1);
}
