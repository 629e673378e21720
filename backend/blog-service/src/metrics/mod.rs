//! Prometheus metrics for blog-service.
//!
//! Exposes HTTP and content collectors and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Requests served, by method, matched route pattern and status code.
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_http_requests_total",
        "Total HTTP requests segmented by method, route and status",
        &["method", "route", "status"]
    )
    .expect("failed to register blog_http_requests_total");

    /// Request latency by method and matched route pattern.
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "blog_http_request_duration_seconds",
        "HTTP request duration segmented by method and route",
        &["method", "route"]
    )
    .expect("failed to register blog_http_request_duration_seconds");

    /// Content mutations (create/edit/delete) that went through.
    pub static ref CONTENT_MUTATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_content_mutations_total",
        "Successful content mutations segmented by kind and action",
        &["kind", "action"]
    )
    .expect("failed to register blog_content_mutations_total");

    /// Mutations refused by the ownership check.
    pub static ref DENIED_MUTATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_denied_mutations_total",
        "Mutations denied by ownership checks segmented by kind and action",
        &["kind", "action"]
    )
    .expect("failed to register blog_denied_mutations_total");
}

pub fn record_mutation(kind: &str, action: &str) {
    CONTENT_MUTATIONS_TOTAL
        .with_label_values(&[kind, action])
        .inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
