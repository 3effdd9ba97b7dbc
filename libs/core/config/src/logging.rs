use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::path::PathBuf;
use std::time::Duration;

/// One day, the default rotation period for the file log.
pub const DEFAULT_ROTATION_INTERVAL_SECS: u64 = 86_400;

/// Where the line log lives and how often it is rolled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub file_name: String,
    pub rotation_interval: Duration,
}

impl LogConfig {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
            rotation_interval: Duration::from_secs(DEFAULT_ROTATION_INTERVAL_SECS),
        }
    }

    pub fn with_rotation_interval(mut self, interval: Duration) -> Self {
        self.rotation_interval = interval;
        self
    }

    /// Full path of the active log file.
    pub fn active_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("logs", "app.log")
    }
}

impl FromEnv for LogConfig {
    /// - LOG_DIR: defaults to `logs`
    /// - LOG_FILE: defaults to `app.log`
    /// - LOG_ROTATION_INTERVAL_SECS: defaults to 86400
    fn from_env() -> Result<Self, ConfigError> {
        let secs = env_parse_or("LOG_ROTATION_INTERVAL_SECS", DEFAULT_ROTATION_INTERVAL_SECS)?;
        if secs == 0 {
            return Err(ConfigError::ParseError {
                key: "LOG_ROTATION_INTERVAL_SECS".to_string(),
                details: "interval must be greater than zero".to_string(),
            });
        }

        Ok(Self::new(env_or_default("LOG_DIR", "logs"), env_or_default("LOG_FILE", "app.log"))
            .with_rotation_interval(Duration::from_secs(secs)))
    }
}
