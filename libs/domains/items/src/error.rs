use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FaultKind};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(i32),

    #[error("{0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<DbErr> for ItemError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                ItemError::StorageUnavailable(err.to_string())
            }
            _ => ItemError::Database(err.to_string()),
        }
    }
}

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::Validation(msg) => AppError::Validation(msg),
            ItemError::StorageUnavailable(_) => AppError::Internal {
                kind: FaultKind::StorageUnavailable,
                message: err.to_string(),
            },
            ItemError::Database(_) => AppError::Internal {
                kind: FaultKind::DatabaseError,
                message: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
