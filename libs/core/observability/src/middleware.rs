//! Axum middleware for automatic HTTP request metrics and the per-request log line.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;

use crate::http_metrics::{FaultKind, HttpMetrics};

/// `path` label for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Middleware function for recording HTTP request metrics.
///
/// Records:
/// - `api_requests_total` - Counter with method, path, status labels
/// - `api_request_duration_seconds` - Histogram with method, path labels
/// - `api_errors_total` - Counter with method, path, error_kind labels, for
///   responses tagged with a [`FaultKind`] extension
///
/// `path` is the matched route template, or [`UNMATCHED_PATH`] when no route
/// matched, so arbitrary URIs cannot grow the label set.
///
/// Each request also produces one INFO line naming the method, the requested
/// URI path, the status and the latency, e.g. `GET /items/3 200 1.204ms`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use observability::{HttpMetrics, track_metrics};
///
/// let metrics = HttpMetrics::new()?;
/// let app = Router::new()
///     .route("/", get(handler))
///     .layer(middleware::from_fn_with_state(metrics, track_metrics));
/// ```
pub async fn track_metrics(
    State(metrics): State<HttpMetrics>,
    matched_path: Option<MatchedPath>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let uri_path = request.uri().path().to_string();
    let path = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed();
    info!("{} {} {} {:.3}ms", method, uri_path, status, elapsed.as_secs_f64() * 1000.0);

    metrics.record_request(&method, &path, status, elapsed);

    if let Some(kind) = response.extensions().get::<FaultKind>() {
        metrics.record_error(&method, &path, *kind);
    }

    response
}
