//! Database library providing SeaORM connectors and utilities
//!
//! # Features
//!
//! - `sql` (default) - SQLite/PostgreSQL support through SeaORM
//! - `config` - `core_config::FromEnv` support for [`sql::SqlConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::sql;
//! use migration::Migrator;
//!
//! let db = sql::connect_from_config(sql::SqlConfig::new("sqlite://crudapi.db?mode=rwc")).await?;
//! sql::run_migrations::<Migrator>(&db, "crud_api").await?;
//! ```

pub mod common;

#[cfg(feature = "sql")]
pub mod sql;

pub use common::{DatabaseError, DatabaseResult};
