use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use crud_api::{build_router, config::AppConfig, state::AppState};
use database::sql::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use observability::{HttpMetrics, LogRotation, LogSink};
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = AppConfig::from_env()?;

    // File sink first so startup lines land in the log file too
    let sink = LogSink::open(&config.logging)?;
    init_tracing(&config.environment, sink.layer());

    info!(
        "Starting {} v{} (log file: {})",
        config.app.name,
        config.app.version,
        sink.active_path().display()
    );

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    run_migrations::<Migrator>(&db, config.app.name).await?;
    info!("Database initialized");

    let rotation = LogRotation::start(sink, config.logging.rotation_interval).await?;
    let metrics = HttpMetrics::new()?;

    let state = AppState::new(db);
    let app = build_router(&state, metrics);

    info!("Starting item API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: stopping log rotation and closing database connections");

            if let Err(e) = rotation.shutdown().await {
                tracing::error!("Error stopping log rotation: {}", e);
            }

            match state.db.close().await {
                Ok(_) => info!("Database connection closed successfully"),
                Err(e) => tracing::error!("Error closing database: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Item API shutdown complete");
    Ok(())
}
