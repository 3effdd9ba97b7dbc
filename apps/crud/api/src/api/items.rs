use axum::Router;
use domain_items::{handlers, ItemService, SqlItemRepository};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = SqlItemRepository::new(state.db.clone());
    let service = ItemService::new(repository);
    handlers::router(service)
}
