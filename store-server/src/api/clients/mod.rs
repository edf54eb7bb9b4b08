//! Client API Module
//!
//! Profile reads only; loyalty mutations happen exclusively in the
//! checkout path. The loyalty snapshot endpoint feeds the cart's
//! client-side pricing.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Client router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/clients", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/loyalty", get(handler::get_loyalty))
}
