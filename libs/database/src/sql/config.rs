use sea_orm::ConnectOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// SQLite file next to the binary, created on first connect.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://crudapi.db?mode=rwc";

/// Connection pool settings.
///
/// ```ignore
/// use database::sql::SqlConfig;
///
/// let config = SqlConfig::new("sqlite::memory:").with_max_connections(1);
/// let options = config.into_connect_options();
/// ```
#[derive(Clone, Debug)]
pub struct SqlConfig {
    /// Database connection URL
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    /// Log every statement through sqlx
    pub sqlx_logging: bool,
}

impl SqlConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self.min_connections = self.min_connections.min(self.max_connections);
        self
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.acquire_timeout)
            .sqlx_logging(self.sqlx_logging);
        opt
    }

    /// Whether the URL points at SQLite
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(8),
            acquire_timeout: Duration::from_secs(8),
            sqlx_logging: false,
        }
    }
}

#[cfg(feature = "config")]
impl FromEnv for SqlConfig {
    /// - DATABASE_URL: defaults to [`DEFAULT_DATABASE_URL`]
    /// - DATABASE_MAX_CONNECTIONS: defaults to 10
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_or_default("DATABASE_URL", DEFAULT_DATABASE_URL);
        let max_connections = env_parse_or("DATABASE_MAX_CONNECTIONS", 10u32)?;

        Ok(Self::new(url).with_max_connections(max_connections))
    }
}
