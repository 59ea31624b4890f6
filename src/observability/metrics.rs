//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bubble_http_requests_total` (counter): requests by method, endpoint, status
//! - `bubble_http_request_duration_seconds` (histogram): latency by endpoint
//!
//! Without an installed recorder the macros are no-ops, so handlers record
//! unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`. Needs a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Label for a request method. Extension methods share one label.
pub fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::PATCH => "PATCH",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "other",
    }
}

/// Record one finished request.
pub fn record_request(method: &Method, status: u16, endpoint: &'static str, start: Instant) {
    metrics::counter!(
        "bubble_http_requests_total",
        "method" => method_label(method),
        "endpoint" => endpoint,
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!("bubble_http_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}
