//! Supplier routes. Static segments (`search`, `name`) take precedence over `:id`.

use crate::handlers::suppliers::{by_name, create, delete as delete_handler, list, read, search, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn supplier_routes(state: AppState) -> Router {
    Router::new()
        .route("/suppliers", get(list).post(create))
        .route("/suppliers/search", get(search))
        .route("/suppliers/name/:name", get(by_name))
        .route(
            "/suppliers/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
