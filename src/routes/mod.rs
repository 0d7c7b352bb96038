//! HTTP routes for the todo service
//!
//! Static route table:
//! - GET    /           - home page
//! - GET    /healthz    - liveness probe
//! - GET    /metrics    - Prometheus exposition
//! - GET    /todo/      - list todos
//! - POST   /todo/      - create todo
//! - PUT    /todo/{id}  - update todo
//! - DELETE /todo/{id}  - delete todo

mod handlers;

use axum::routing::{get, put};
use axum::Router;
use std::sync::Arc;

use crate::storage::TodoStore;

/// Create the application router
pub fn create_router(store: Arc<dyn TodoStore>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/healthz", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        // mounted with the trailing slash so the collection lives at /todo/
        .nest("/todo/", todo_routes())
        .with_state(store)
}

/// Sub-router mounted under the collection's path prefix
fn todo_routes() -> Router<Arc<dyn TodoStore>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/:id",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
}
