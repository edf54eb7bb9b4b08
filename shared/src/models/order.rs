//! Order Model
//!
//! Orders are append-only: the core creates them in `New`/`Preorder`
//! status and clients may soft-delete their own; the remaining status
//! progression is staff-driven.

use serde::{Deserialize, Serialize};

use crate::cart::{PaymentChoice, PaymentMethod};

/// Order lifecycle status.
///
/// `New` and `Preorder` are produced at checkout; `Assembling`, `Ready`
/// and `Completed` are staff transitions; `Deleted` is the owner's
/// soft-delete. Orders are never hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum OrderStatus {
    New,
    Preorder,
    Assembling,
    Ready,
    Completed,
    Deleted,
}

/// A frozen order line — prices locked at submission time, no live
/// reference back to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_cash_price: i64,
    pub unit_card_price: i64,
    pub payment_override: Option<PaymentChoice>,
    /// Effective per-unit price under the order's payment method
    pub unit_price: i64,
    pub line_total: i64,
}

/// Order entity with its totals breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub location_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub lines: Vec<OrderLine>,
    pub subtotal: i64,
    pub volume_discount: i64,
    pub cash_savings: i64,
    pub loyalty_discount: i64,
    pub coins_redeemed: i64,
    pub coins_earned: i64,
    pub total: i64,
    pub comment: Option<String>,
    /// Client-generated idempotency key; a replayed checkout with the
    /// same key returns this order instead of creating a duplicate
    pub request_key: Option<String>,
    pub created_at: i64,
}

/// One line of an incoming checkout request.
///
/// Prices are not taken from the client — the server re-prices every
/// line from the canonical catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub payment_override: Option<PaymentChoice>,
}

/// Checkout request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub client_id: i64,
    #[serde(default)]
    pub location_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CheckoutLine>,
    #[serde(default)]
    pub coins_to_redeem: i64,
    #[serde(default)]
    pub comment: Option<String>,
    /// Total the client's cart displayed; checkout rejects when it
    /// disagrees with the server-derived total
    #[serde(default)]
    pub expected_total: Option<i64>,
    #[serde(default)]
    pub request_key: Option<String>,
}

/// Checkout response body.
///
/// `loyalty` is `None` when the client record was not found (guest-like
/// flow) or the loyalty write degraded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order: Order,
    pub loyalty: Option<crate::models::LoyaltySnapshot>,
}
