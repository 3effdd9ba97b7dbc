use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use observability::FaultKind;
use std::any::Any;

use super::{AppError, ErrorResponse, RESOURCE_NOT_FOUND};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    AppError::NotFound("The requested resource was not found".to_string()).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse::new(
        "Method Not Allowed",
        "The HTTP method is not allowed for this resource",
    ));

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
///
/// Turns a panicking handler into the same 500 body as any other unhandled
/// fault, tagged [`FaultKind::Panic`].
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    AppError::Internal {
        kind: FaultKind::Panic,
        message,
    }
    .into_response()
}
