//! Observability utilities for the item API.
//!
//! This crate provides:
//! - An injected Prometheus registry for request counts, latency and faults
//! - Axum middleware that records every request against that registry
//! - A `tracing` layer writing `<timestamp> - <level> - <message>` lines to a file
//! - A scheduled job that rolls the log file over to a dated name
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{HttpMetrics, LogRotation, LogSink, track_metrics};
//!
//! let sink = LogSink::open(&log_config)?;
//! core_config::tracing::init_tracing(&environment, sink.layer());
//! let rotation = LogRotation::start(sink.clone(), log_config.rotation_interval).await?;
//!
//! let metrics = HttpMetrics::new()?;
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(metrics.clone(), track_metrics))
//!     .merge(metrics_router(metrics));
//! ```

pub mod http_metrics;
pub mod log_sink;
pub mod middleware;
pub mod rotation;

pub use http_metrics::{FaultKind, HttpMetrics, metrics_router};
pub use log_sink::{LineFormat, LogSink, RotationOutcome};
pub use middleware::track_metrics;
pub use rotation::LogRotation;

/// Errors raised while setting up metrics or the file log.
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Failed to build Prometheus recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Log file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}
