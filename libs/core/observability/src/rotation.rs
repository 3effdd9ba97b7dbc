//! Periodic log rotation.

use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::{ObservabilityError, log_sink::LogSink};

/// Owns the scheduler that rolls the log file over every `interval`.
///
/// ```rust,ignore
/// let rotation = LogRotation::start(sink.clone(), Duration::from_secs(86_400)).await?;
/// // ... serve ...
/// rotation.shutdown().await?;
/// ```
pub struct LogRotation {
    scheduler: JobScheduler,
}

impl LogRotation {
    pub async fn start(sink: LogSink, interval: Duration) -> Result<Self, ObservabilityError> {
        let scheduler = JobScheduler::new().await?;

        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let sink = sink.clone();

            Box::pin(async move {
                match tokio::task::spawn_blocking(move || sink.rotate()).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => error!(error = %e, "Log rotation failed"),
                    Err(e) => error!(error = %e, "Log rotation task panicked"),
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!(interval_secs = interval.as_secs(), "Log rotation scheduled");
        Ok(Self { scheduler })
    }

    /// Stop the scheduler. No rotation runs after this returns.
    pub async fn shutdown(mut self) -> Result<(), ObservabilityError> {
        self.scheduler.shutdown().await?;
        info!("Log rotation stopped");
        Ok(())
    }
}
