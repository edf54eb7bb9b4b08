//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`checkout`] - checkout endpoint (fulfillment orchestrator)
//! - [`orders`] - order history and owner soft-delete
//! - [`clients`] - client profile and loyalty snapshot
//! - [`stock_subscriptions`] - back-in-stock alert subscriptions

pub mod checkout;
pub mod clients;
pub mod health;
pub mod orders;
pub mod stock_subscriptions;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

/// Assemble the full application router.
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(clients::router())
        .merge(stock_subscriptions::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
