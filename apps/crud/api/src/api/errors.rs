//! Synthetic error endpoint for exercising the error path end to end.

use axum::{extract::Path, http::StatusCode, routing::get, Router};
use axum_helpers::{AppError, ErrorResponse};

/// Status and message for each code `/error/{code}` knows about.
const ERROR_TABLE: [(&str, u16, &str); 6] = [
    ("400", 400, "Bad Request Error"),
    ("401", 401, "Unauthorized Access"),
    ("403", 403, "Forbidden Access"),
    ("404", 404, "Resource Not Found"),
    ("500", 500, "Internal Server Error"),
    ("503", 503, "Service Unavailable"),
];

const UNKNOWN: (StatusCode, &str) = (StatusCode::BAD_REQUEST, "Unknown Error");

/// Status and message for `code`; anything not in the table is a 400 "Unknown Error".
pub fn lookup(code: &str) -> (StatusCode, &'static str) {
    ERROR_TABLE
        .iter()
        .find(|(key, _, _)| *key == code)
        .and_then(|(_, status, message)| {
            StatusCode::from_u16(*status).ok().map(|status| (status, *message))
        })
        .unwrap_or(UNKNOWN)
}

/// Respond with the tabled error for `code`. Never touches storage.
#[utoipa::path(
    get,
    path = "/error/{code}",
    tag = "diagnostics",
    params(
        ("code" = String, Path, description = "One of 400, 401, 403, 404, 500, 503")
    ),
    responses(
        (status = 400, description = "Bad request or unknown code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Service unavailable", body = ErrorResponse)
    )
)]
pub async fn trigger_error(Path(code): Path<String>) -> AppError {
    let (status, message) = lookup(&code);
    tracing::error!("Generated Error {}: {}", status.as_u16(), message);

    AppError::Status {
        status,
        message: message.to_string(),
    }
}

pub fn router() -> Router {
    Router::new().route("/error/{code}", get(trigger_error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_codes() {
        assert_eq!(lookup("404"), (StatusCode::NOT_FOUND, "Resource Not Found"));
        assert_eq!(lookup("503"), (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable"));
        assert_eq!(lookup("401"), (StatusCode::UNAUTHORIZED, "Unauthorized Access"));
    }

    #[test]
    fn test_lookup_unknown_code_is_400() {
        assert_eq!(lookup("999"), (StatusCode::BAD_REQUEST, "Unknown Error"));
        assert_eq!(lookup("teapot"), (StatusCode::BAD_REQUEST, "Unknown Error"));
        assert_eq!(lookup("0404"), (StatusCode::BAD_REQUEST, "Unknown Error"));
    }
}
