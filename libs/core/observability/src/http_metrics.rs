//! Request metrics backed by a Prometheus recorder owned by the application.
//!
//! Nothing here installs a global recorder: the router receives an
//! [`HttpMetrics`] value and every test builds its own isolated registry.

use axum::{Router, extract::State, http::header, response::IntoResponse, routing::get};
use metrics::{Key, KeyName, Label, Level, Metadata, Recorder, SharedString};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use std::{fmt, sync::Arc, time::Duration};

use crate::ObservabilityError;

pub const REQUESTS_TOTAL: &str = "api_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "api_request_duration_seconds";
pub const ERRORS_TOTAL: &str = "api_errors_total";

const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Classification of a fault that reached the top-level translator.
///
/// Responses carry it as an extension so the metrics middleware can label
/// `api_errors_total` without knowing about handler error types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
    StorageUnavailable,
    DatabaseError,
    Internal,
    Panic,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::StorageUnavailable => "StorageUnavailable",
            FaultKind::DatabaseError => "DatabaseError",
            FaultKind::Internal => "Internal",
            FaultKind::Panic => "Panic",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cloneable handle to the request metrics registry.
#[derive(Clone)]
pub struct HttpMetrics {
    recorder: Arc<PrometheusRecorder>,
    handle: PrometheusHandle,
}

impl HttpMetrics {
    pub fn new() -> Result<Self, ObservabilityError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
                DURATION_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        let metrics = Self {
            recorder: Arc::new(recorder),
            handle,
        };
        metrics.describe();
        Ok(metrics)
    }

    fn describe(&self) {
        self.recorder.describe_counter(
            KeyName::from_const_str(REQUESTS_TOTAL),
            None,
            SharedString::const_str("Total number of HTTP requests"),
        );
        self.recorder.describe_histogram(
            KeyName::from_const_str(REQUEST_DURATION_SECONDS),
            None,
            SharedString::const_str("HTTP request duration in seconds"),
        );
        self.recorder.describe_counter(
            KeyName::from_const_str(ERRORS_TOTAL),
            None,
            SharedString::const_str("Total number of requests that ended in an unhandled fault"),
        );
    }

    /// Count one completed request and observe its latency.
    pub fn record_request(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        let counter_key = Key::from_parts(
            REQUESTS_TOTAL,
            vec![
                Label::new("method", method.to_string()),
                Label::new("path", path.to_string()),
                Label::new("status", status.to_string()),
            ],
        );
        self.recorder
            .register_counter(&counter_key, &metadata())
            .increment(1);

        let histogram_key = Key::from_parts(
            REQUEST_DURATION_SECONDS,
            vec![
                Label::new("method", method.to_string()),
                Label::new("path", path.to_string()),
            ],
        );
        self.recorder
            .register_histogram(&histogram_key, &metadata())
            .record(elapsed.as_secs_f64());
    }

    pub fn record_error(&self, method: &str, path: &str, kind: FaultKind) {
        let key = Key::from_parts(
            ERRORS_TOTAL,
            vec![
                Label::new("method", method.to_string()),
                Label::new("path", path.to_string()),
                Label::new("error_kind", kind.as_str()),
            ],
        );
        self.recorder.register_counter(&key, &metadata()).increment(1);
    }

    /// Prometheus text exposition of everything recorded so far.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

fn metadata() -> Metadata<'static> {
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()))
}

async fn render_metrics(State(metrics): State<HttpMetrics>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics.render(),
    )
}

/// `GET /metrics`. Merge it outside the metrics middleware so scrapes are not counted.
pub fn metrics_router<S>(metrics: HttpMetrics) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(metrics)
}
