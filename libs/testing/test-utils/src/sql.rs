//! SQLite test infrastructure
//!
//! Provides a `TestDatabase` helper backed by SQLite (in memory, or a
//! temporary file when a test needs a real connection pool) with the
//! workspace migrations applied.

use database::sql::{SqlConfig, connect_from_config, run_migrations};
use migration::Migrator;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Test database wrapper
///
/// Each instance is its own private database. In-memory ones disappear with
/// the last connection; file-backed ones with the wrapper's temporary directory.
pub struct TestDatabase {
    pub connection: DatabaseConnection,
    pub connection_string: String,
    _dir: Option<TempDir>,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        // One connection: every pooled connection would otherwise open a separate database
        Self::open("sqlite::memory:".to_string(), 1, None).await
    }

    /// A database file in a fresh temporary directory, served by a pool of
    /// `max_connections`, for tests that need truly concurrent access.
    pub async fn file_backed(max_connections: u32) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let connection_string = format!("sqlite://{}?mode=rwc", dir.path().join("items.db").display());

        Self::open(connection_string, max_connections, Some(dir)).await
    }

    async fn open(connection_string: String, max_connections: u32, dir: Option<TempDir>) -> Self {
        let config = SqlConfig::new(connection_string.clone()).with_max_connections(max_connections);
        let connection = connect_from_config(config)
            .await
            .expect("Failed to open SQLite test database");

        run_migrations::<Migrator>(&connection, "test-utils")
            .await
            .expect("Failed to run migrations");

        tracing::debug!("Test database ready ({})", connection_string);

        Self {
            connection,
            connection_string,
            _dir: dir,
        }
    }

    /// Get a cloned connection (useful for passing to repositories)
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
