//! Prometheus metrics collection middleware
//!
//! Records `http_requests_total` (counter) and `http_request_duration_seconds`
//! (histogram) for every request, with method/path/status labels.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Top-level paths served by the app; anything else is labelled `unmatched`
const KNOWN_PREFIXES: &[&str] = &["/api/", "/health", "/metrics"];

/// Normalize request paths to avoid high-cardinality labels.
///
/// Record ids collapse to `:id`, and paths outside the app's routes (scanners,
/// typos) share a single `unmatched` label.
fn normalize_path(path: &str) -> String {
    if !KNOWN_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return "unmatched".to_string();
    }

    path.split('/')
        .map(|seg| {
            if uuid::Uuid::try_parse(seg).is_ok() {
                ":id"
            } else {
                seg
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Middleware that records request count and duration metrics.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(duration);

    response
}
