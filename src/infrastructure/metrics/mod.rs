//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Event registration attempts by outcome
//! - Order settlements
//! - Reservation validations by verdict

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "game_cafe";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Event registration attempts by outcome
/// ("created", "already_registered", "event_full", "not_found", "error")
pub static EVENT_REGISTRATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "event_registrations_total",
            "Event registration attempts by outcome",
        )
        .namespace(NAMESPACE),
        &["outcome"],
    )
    .expect("Failed to create EVENT_REGISTRATIONS_TOTAL metric")
});

/// Settled orders
pub static ORDER_SETTLEMENTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("order_settlements_total", "Orders settled").namespace(NAMESPACE),
    )
    .expect("Failed to create ORDER_SETTLEMENTS_TOTAL metric")
});

/// Reservation validations by verdict ("valid", "invalid")
pub static RESERVATION_VALIDATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "reservation_validations_total",
            "Reservation validations by verdict",
        )
        .namespace(NAMESPACE),
        &["result"],
    )
    .expect("Failed to create RESERVATION_VALIDATIONS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(EVENT_REGISTRATIONS_TOTAL.clone()))
        .expect("Failed to register EVENT_REGISTRATIONS_TOTAL");
    registry
        .register(Box::new(ORDER_SETTLEMENTS_TOTAL.clone()))
        .expect("Failed to register ORDER_SETTLEMENTS_TOTAL");
    registry
        .register(Box::new(RESERVATION_VALIDATIONS_TOTAL.clone()))
        .expect("Failed to register RESERVATION_VALIDATIONS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to record the outcome of a registration attempt
pub fn record_registration(outcome: &str) {
    Lazy::force(&REGISTRY);
    EVENT_REGISTRATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record a settled order
pub fn record_order_settlement() {
    Lazy::force(&REGISTRY);
    ORDER_SETTLEMENTS_TOTAL.inc();
}

/// Helper to record a reservation verdict
pub fn record_reservation_validation(is_valid: bool) {
    Lazy::force(&REGISTRY);
    let result = if is_valid { "valid" } else { "invalid" };
    RESERVATION_VALIDATIONS_TOTAL.with_label_values(&[result]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        // Force lazy initialization
        let _ = &*REGISTRY;
        let _ = &*HTTP_REQUESTS_TOTAL;
        let _ = &*EVENT_REGISTRATIONS_TOTAL;
        let _ = &*ORDER_SETTLEMENTS_TOTAL;
    }

    #[test]
    fn test_record_http_request() {
        Lazy::force(&REGISTRY);
        record_http_request("GET", "/health", 200, 0.001);
        let metrics = gather_metrics();
        assert!(metrics.contains("game_cafe_http_requests_total"));
    }

    #[test]
    fn test_record_registration_outcome() {
        record_registration("event_full");
        let metrics = gather_metrics();
        assert!(metrics.contains("game_cafe_event_registrations_total"));
        assert!(metrics.contains("outcome=\"event_full\""));
    }
}
