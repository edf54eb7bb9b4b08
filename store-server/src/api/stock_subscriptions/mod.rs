//! Stock Subscription API Module

mod handler;

use axum::{
    Router,
    routing::{delete, post},
};

use crate::core::ServerState;

/// Stock subscription router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/stock-subscriptions", post(handler::create))
        .route("/api/stock-subscriptions/{id}", delete(handler::remove))
}
