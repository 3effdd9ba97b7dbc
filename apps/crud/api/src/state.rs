//! Application state management.

use sea_orm::DatabaseConnection;

/// Shared application state.
///
/// Cloned into each router that needs it; the connection pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// SQL connection pool (SQLite or PostgreSQL)
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
