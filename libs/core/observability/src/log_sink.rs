//! File sink for the line log.
//!
//! Every `tracing` event becomes one `<timestamp> - <level> - <message>` line
//! in the active log file. Writes and rotation share one mutex, so a line is
//! never split across the rotated and the fresh file.

use chrono::{Local, NaiveDate};
use core_config::logging::LogConfig;
use std::{
    fmt::{self, Write as _},
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{Event, Subscriber, info, warn};
use tracing_subscriber::{
    Layer,
    fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter, format::Writer},
    registry::LookupSpan,
};

/// `2026-10-19 14:03:07,412 - INFO - Fetched 3 items`
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// What a rotation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The active file was renamed to this path and a fresh one opened.
    Rotated(PathBuf),
    /// There was no active file to rename; a fresh one was opened.
    Missing,
}

struct SinkInner {
    dir: PathBuf,
    file_name: String,
    file: Mutex<File>,
}

/// Append-only handle to the active log file. Cheap to clone.
#[derive(Clone)]
pub struct LogSink {
    inner: Arc<SinkInner>,
}

impl LogSink {
    /// Create the log directory if needed and open the active file for appending.
    pub fn open(config: &LogConfig) -> io::Result<Self> {
        fs::create_dir_all(&config.dir)?;
        let file = open_append(&config.active_path())?;

        Ok(Self {
            inner: Arc::new(SinkInner {
                dir: config.dir.clone(),
                file_name: config.file_name.clone(),
                file: Mutex::new(file),
            }),
        })
    }

    pub fn active_path(&self) -> PathBuf {
        self.inner.dir.join(&self.inner.file_name)
    }

    /// Formatting layer that writes to this sink.
    pub fn layer<S>(&self) -> impl Layer<S> + Send + Sync + 'static
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat)
            .with_writer(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, File> {
        self.inner.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rename the active file to its dated name and start a fresh one, using today's date.
    pub fn rotate(&self) -> io::Result<RotationOutcome> {
        self.rotate_on(Local::now().date_naive())
    }

    /// Rotate as if it were `date`, then log the result.
    ///
    /// The event is emitted after the file lock is released, so it lands in the
    /// fresh file.
    pub fn rotate_on(&self, date: NaiveDate) -> io::Result<RotationOutcome> {
        let outcome = {
            let mut file = self.lock();
            let active = self.active_path();

            if active.exists() {
                let target = rotated_path(&self.inner.dir, &self.inner.file_name, date);
                file.flush()?;
                swap_active(&mut file, &active, &target, open_append)?;
                RotationOutcome::Rotated(target)
            } else {
                *file = open_append(&active)?;
                RotationOutcome::Missing
            }
        };

        match &outcome {
            RotationOutcome::Rotated(target) => {
                info!("Log file rotated to {}", target.display());
            }
            RotationOutcome::Missing => {
                warn!(
                    "Active log file {} was missing; started a new one",
                    self.active_path().display()
                );
            }
        }

        Ok(outcome)
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Move `active` to `target` and point `file` at a fresh `active`.
///
/// If the fresh file cannot be opened the rename is undone, so `file` keeps
/// writing under the active name instead of into the dated file.
fn swap_active(
    file: &mut File,
    active: &Path,
    target: &Path,
    open: impl FnOnce(&Path) -> io::Result<File>,
) -> io::Result<()> {
    fs::rename(active, target)?;

    match open(active) {
        Ok(fresh) => {
            *file = fresh;
            Ok(())
        }
        Err(e) => {
            fs::rename(target, active)?;
            Err(e)
        }
    }
}

/// `app.log` on 2026-10-19 becomes `app_20261019.log`, or `app_20261019_1.log`
/// and so on when that name is taken.
fn rotated_path(dir: &Path, file_name: &str, date: NaiveDate) -> PathBuf {
    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    let suffix = name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stamp = date.format("%Y%m%d");

    let candidate = dir.join(format!("{stem}_{stamp}{suffix}"));
    if !candidate.exists() {
        return candidate;
    }

    (1..)
        .map(|n| dir.join(format!("{stem}_{stamp}_{n}{suffix}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Writer handed out per event; holds the file lock until the line is written.
pub struct SinkWriter<'a> {
    file: MutexGuard<'a, File>,
}

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = SinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter { file: self.lock() }
    }
}
