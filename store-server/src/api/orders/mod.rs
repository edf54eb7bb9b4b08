//! Order API Module
//!
//! Read access to placed orders plus the owner's soft-delete. Order
//! creation goes through the checkout endpoint; the remaining status
//! progression is staff tooling outside this API.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id).delete(handler::soft_delete))
}
