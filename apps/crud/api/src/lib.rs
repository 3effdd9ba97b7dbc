//! Item CRUD API
//!
//! Wires the items domain, the readiness check and the synthetic `/error`
//! endpoint into one router behind the shared metrics, tracing and panic layers.

use axum::Router;
use axum_helpers::server::create_router;
use observability::HttpMetrics;

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use state::AppState;

/// The complete application router, `/metrics` included.
pub fn build_router(state: &AppState, metrics: HttpMetrics) -> Router {
    create_router::<openapi::ApiDoc>(api::routes(state), metrics)
}
