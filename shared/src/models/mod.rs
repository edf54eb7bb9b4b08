//! Entity models shared across the storefront.

pub mod client;
pub mod inventory;
pub mod location;
pub mod order;
pub mod product;
pub mod stock_subscription;

pub use client::{Client, LoyaltySnapshot};
pub use inventory::InventoryRecord;
pub use location::Location;
pub use order::{
    CheckoutLine, CheckoutRequest, CheckoutResponse, Order, OrderLine, OrderStatus,
};
pub use product::Product;
pub use stock_subscription::{StockSubscription, StockSubscriptionCreate};
