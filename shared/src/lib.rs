//! Shared domain types and pure logic for the storefront.
//!
//! This crate holds everything both sides of the wire agree on:
//!
//! - **Models** (`models`): catalog, client, inventory, order and
//!   subscription entities with their create payloads.
//! - **Cart** (`cart`): the mutable cart state machine and the pure
//!   pricing engine that re-derives totals on every mutation.
//! - **Loyalty** (`loyalty`): tier thresholds, cashback rate and coin
//!   redemption cap used by both the cart and the checkout path.
//! - **Utilities** (`util`): epoch-millisecond timestamps and
//!   snowflake-style IDs.
//!
//! No I/O lives here; persistence derives are feature-gated behind `db`.

pub mod cart;
pub mod loyalty;
pub mod models;
pub mod util;

pub use cart::{Cart, CartLine, CartTotals, PaymentChoice, PaymentMethod};
pub use models::{
    Client, InventoryRecord, Location, LoyaltySnapshot, Order, OrderLine, OrderStatus, Product,
    StockSubscription,
};
