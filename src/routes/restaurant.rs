//! Restaurant CRUD routes. Handlers parse the id segment themselves so a
//! bad id maps into the error envelope instead of the extractor default.

use crate::handlers::restaurant::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn restaurant_routes(state: AppState) -> Router {
    Router::new()
        .route("/restaurants", get(list).post(create))
        .route(
            "/restaurants/:id",
            get(read).patch(update).delete(delete_handler),
        )
        .with_state(state)
}
