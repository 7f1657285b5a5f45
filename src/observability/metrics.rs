//! Metrics collection.
//!
//! # Metrics
//! - `connector_init_attempts_total` (counter): construction attempts
//! - `connector_init_failures_total` (counter): failed construction attempts
//! - `connector_handle_ready` (gauge): 1=handle cached, 0=not
//! - `backend_health` (gauge): 1=healthy, 0=unhealthy, labelled by endpoint
//!
//! Recorded through the `metrics` facade; the binary or host installs an exporter.

pub fn record_init_attempt() {
    metrics::counter!("connector_init_attempts_total").increment(1);
}

pub fn record_init_failure() {
    metrics::counter!("connector_init_failures_total").increment(1);
}

pub fn record_handle_ready(ready: bool) {
    metrics::gauge!("connector_handle_ready").set(if ready { 1.0 } else { 0.0 });
}

pub fn record_backend_health(endpoint: &str, healthy: bool) {
    metrics::gauge!("backend_health", "endpoint" => endpoint.to_string())
        .set(if healthy { 1.0 } else { 0.0 });
}
