//! Prometheus metrics for the todo service
//!
//! Defines metrics for:
//! - Request counts by method and status
//! - Request latency
//! - Storage operation counts and duration

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use lazy_static::lazy_static;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use std::time::Instant;

lazy_static! {
    /// Registry for all metrics
    pub static ref REGISTRY: Registry = Registry::new();

    /// HTTP request counter by method and status
    pub static ref HTTP_REQUESTS: IntCounterVec = IntCounterVec::new(
        Opts::new("todo_api_http_requests_total", "Total HTTP requests"),
        &["method", "status"]
    )
    .expect("Failed to create HTTP_REQUESTS metric");

    /// HTTP request latency histogram
    pub static ref HTTP_REQUEST_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "todo_api_http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])
    )
    .expect("Failed to create HTTP_REQUEST_DURATION metric");

    /// Storage operation counter by operation and outcome
    pub static ref STORAGE_OPERATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("todo_api_storage_operations_total", "Total storage operations"),
        &["operation", "outcome"]
    )
    .expect("Failed to create STORAGE_OPERATIONS metric");

    /// Storage operation duration histogram
    pub static ref STORAGE_OPERATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "todo_api_storage_operation_duration_seconds",
            "Storage operation duration in seconds"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])
    )
    .expect("Failed to create STORAGE_OPERATION_DURATION metric");
}

/// Initialize metrics and register with the global registry
pub fn init_metrics() {
    REGISTRY.register(Box::new(HTTP_REQUESTS.clone())).unwrap();
    REGISTRY.register(Box::new(HTTP_REQUEST_DURATION.clone())).unwrap();
    REGISTRY.register(Box::new(STORAGE_OPERATIONS.clone())).unwrap();
    REGISTRY.register(Box::new(STORAGE_OPERATION_DURATION.clone())).unwrap();
}

/// Axum middleware recording request count and latency
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    HTTP_REQUEST_DURATION.observe(start.elapsed().as_secs_f64());
    HTTP_REQUESTS
        .with_label_values(&[&method, response.status().as_str()])
        .inc();

    response
}

/// Record a single storage operation's outcome and duration
pub fn observe_storage(operation: &str, start: Instant, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    STORAGE_OPERATIONS
        .with_label_values(&[operation, outcome])
        .inc();
    STORAGE_OPERATION_DURATION.observe(start.elapsed().as_secs_f64());
}
