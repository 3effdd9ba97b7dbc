use axum::{routing::get, Router};
use axum_helpers::server::health_router;

use crate::state::AppState;

pub mod errors;
pub mod health;
pub mod items;

/// All application routes, each sub-router with its state already applied.
///
/// `/health` and `/ready` live here rather than beside `/metrics` so that
/// checks are counted like any other request.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(health_router())
        .merge(ready_router(state.clone()))
        .merge(errors::router())
        .merge(items::router(state))
}

/// Creates a router with the /ready endpoint that pings the database.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
