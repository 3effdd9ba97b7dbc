use axum_helpers::{ErrorResponse, HealthResponse};
use utoipa::OpenApi;

/// Endpoints owned by the application crate itself
#[derive(OpenApi)]
#[openapi(
    paths(
        axum_helpers::server::health::health_handler,
        crate::api::health::ready_handler,
        crate::api::errors::trigger_error,
    ),
    components(schemas(ErrorResponse, HealthResponse)),
    info(
        title = "Item API",
        version = "0.1.0",
        description = "CRUD API for items with Prometheus metrics"
    ),
    tags(
        (name = "health", description = "Liveness and readiness checks"),
        (name = "diagnostics", description = "Synthetic error responses")
    )
)]
struct CoreApiDoc;

/// The full document: application endpoints plus the items domain.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = CoreApiDoc::openapi();
        doc.merge(domain_items::handlers::ApiDoc::openapi());
        doc
    }
}
