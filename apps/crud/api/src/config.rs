use core_config::{app_info, logging::LogConfig, server::ServerConfig, AppInfo, FromEnv};
use database::sql::SqlConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub app: AppInfo,
    pub database: SqlConfig,
    pub logging: LogConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl AppConfig {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = SqlConfig::from_env()?; // DATABASE_URL, defaults to a local SQLite file
        let logging = LogConfig::from_env()?; // LOG_DIR / LOG_FILE, daily rotation
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=5000

        Ok(Self {
            app: app_info!(),
            database,
            logging,
            server,
            environment,
        })
    }
}
