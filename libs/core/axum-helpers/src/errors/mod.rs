pub mod handlers;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use observability::FaultKind;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// `error` value for rejected request bodies.
pub const INVALID_DATA: &str = "Invalid data";
/// `error` value for every 404.
pub const RESOURCE_NOT_FOUND: &str = "Resource Not Found";
/// `error` value for faults that reached the translator.
pub const INTERNAL_ERROR: &str = "An internal error occurred";

/// Standard error response structure.
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Invalid data",
///   "message": "Missing name or description"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short error category
    pub error: String,
    /// Human-readable detail, omitted when the category says it all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: Some(message.into()),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// `Internal` is the catch-all translator: it logs the fault, answers with the
/// uniform 500 body and tags the response with its [`FaultKind`] so the
/// metrics middleware counts it in `api_errors_total`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid data: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A deliberate error status whose body is just `{"error": message}`.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("{message}")]
    Internal { kind: FaultKind, message: String },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Status { status, .. } => *status,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// The first message in `errors`, checking struct-level errors (`__all__`)
/// before fields and fields in name order.
pub fn validation_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| (field, e)))
        .map(|(field, e)| match &e.message {
            Some(message) => message.to_string(),
            None => format!("{field} is invalid"),
        })
        .next()
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(
            validation_message(&errors).unwrap_or_else(|| "Request validation failed".to_string()),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            AppError::Validation(message) => {
                tracing::info!("Invalid data: {}", message);
                (status, Json(ErrorResponse::new(INVALID_DATA, message))).into_response()
            }
            AppError::NotFound(message) => {
                tracing::info!("Not found: {}", message);
                (status, Json(ErrorResponse::new(RESOURCE_NOT_FOUND, message))).into_response()
            }
            AppError::Status { message, .. } => {
                let body = ErrorResponse {
                    error: message,
                    message: None,
                };
                (status, Json(body)).into_response()
            }
            AppError::Internal { kind, message } => {
                tracing::error!(error_kind = %kind, "Unhandled error: {}", message);
                let mut response =
                    (status, Json(ErrorResponse::new(INTERNAL_ERROR, message))).into_response();
                response.extensions_mut().insert(kind);
                response
            }
        }
    }
}
