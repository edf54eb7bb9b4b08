//! Checkout API Module
//!
//! The single write entry point of the storefront: all order creation
//! goes through the fulfillment orchestrator.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Checkout router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/checkout", post(handler::create))
}
