//! Cart state and the pure pricing engine.
//!
//! A [`Cart`] is the single mutable thing a shopping session owns; every
//! mutation keeps its invariants (unique lines, positive quantities,
//! overrides only while in mixed mode). Pricing is a pure function of
//! cart state plus a loyalty snapshot: [`compute_totals`] never performs
//! I/O and is re-run on every mutation, so totals can be re-derived
//! identically on both sides of the wire.
//!
//! All amounts are whole currency units (`i64`).

use serde::{Deserialize, Serialize};

use crate::loyalty;
use crate::models::LoyaltySnapshot;

/// Maximum allowed unit price
pub const MAX_UNIT_PRICE: i64 = 1_000_000;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9_999;
/// Maximum allowed order comment length
pub const MAX_COMMENT_LEN: usize = 500;

/// Volume discount steps: (minimum total quantity, per-unit discount),
/// highest step first. The discount applies per unit across the whole
/// cart, keyed to total quantity rather than per-product thresholds.
const VOLUME_TIERS: &[(i64, i64)] = &[(7, 60), (5, 50), (2, 30)];

/// Total quantity at which the non-monetary free-unit perk unlocks.
const FREE_UNIT_THRESHOLD: i64 = 5;

/// How the whole order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum PaymentMethod {
    Cash,
    Card,
    Mixed,
}

/// Per-line price list choice, only meaningful under
/// [`PaymentMethod::Mixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum PaymentChoice {
    Cash,
    Card,
}

/// One cart line. Unique per product; exists only with a positive
/// quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_cash_price: i64,
    pub unit_card_price: i64,
    pub payment_override: Option<PaymentChoice>,
}

impl CartLine {
    /// Effective per-unit price under the given payment method.
    ///
    /// Mixed mode prices the line by its override, defaulting to the
    /// card list when unset; uniform modes ignore overrides entirely.
    pub fn effective_unit_price(&self, method: PaymentMethod) -> i64 {
        match method {
            PaymentMethod::Cash => self.unit_cash_price,
            PaymentMethod::Card => self.unit_card_price,
            PaymentMethod::Mixed => match self.payment_override {
                Some(PaymentChoice::Cash) => self.unit_cash_price,
                _ => self.unit_card_price,
            },
        }
    }
}

/// Mutable cart session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub pickup_location_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub coins_to_redeem: i64,
    pub comment: Option<String>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            pickup_location_id: None,
            payment_method: PaymentMethod::Cash,
            coins_to_redeem: 0,
            comment: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add a line, merging quantities when the product is already in
    /// the cart.
    pub fn add_line(&mut self, line: CartLine) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == line.product_id)
        {
            existing.quantity += line.quantity;
        } else {
            self.lines.push(line);
        }
    }

    /// Set a line's quantity; zero or negative removes the line, so a
    /// line never exists with a non-positive quantity.
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove_line(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Switch the payment method. Leaving mixed mode drops every
    /// per-line override — uniform modes must not carry stale choices.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        if self.payment_method == PaymentMethod::Mixed && method != PaymentMethod::Mixed {
            for line in &mut self.lines {
                line.payment_override = None;
            }
        }
        self.payment_method = method;
    }

    /// Choose the price list for one line (mixed mode).
    pub fn set_line_override(&mut self, product_id: i64, choice: Option<PaymentChoice>) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.payment_override = choice;
        }
    }

    /// Request a coin redemption; the value is clamped into
    /// `[0, min(balance, subtotal/2)]` rather than rejected.
    pub fn set_coins_to_redeem(&mut self, requested: i64, account: &LoyaltySnapshot) {
        let subtotal = subtotal(self);
        self.coins_to_redeem =
            loyalty::clamp_redemption(requested, subtotal, account.coin_balance);
    }

    /// Recompute all totals for this cart against a loyalty snapshot.
    pub fn totals(&self, account: &LoyaltySnapshot) -> CartTotals {
        compute_totals(self, account)
    }
}

/// Fully derived cart totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: i64,
    pub total_quantity: i64,
    pub volume_discount_per_unit: i64,
    pub volume_discount: i64,
    /// Non-monetary perk flag, unlocked at five total units. Carried
    /// alongside the price, never itself a price reduction.
    pub free_unit_eligible: bool,
    /// Σ(card − cash) × qty, only meaningful when paying cash
    pub cash_savings: i64,
    pub loyalty_discount: i64,
    pub redemption_cap: i64,
    pub coins_redeemed: i64,
    pub coins_earned: i64,
    pub total: i64,
}

/// Per-unit volume discount for a total quantity.
pub fn volume_discount_per_unit(total_quantity: i64) -> i64 {
    VOLUME_TIERS
        .iter()
        .find(|(min_qty, _)| total_quantity >= *min_qty)
        .map(|(_, discount)| *discount)
        .unwrap_or(0)
}

fn subtotal(cart: &Cart) -> i64 {
    cart.lines
        .iter()
        .map(|l| l.effective_unit_price(cart.payment_method) * l.quantity)
        .sum()
}

/// Compute all totals for a cart against a loyalty snapshot.
///
/// Deterministic and I/O-free. The final total is clamped at zero:
/// stacked discounts never make an order negative.
pub fn compute_totals(cart: &Cart, account: &LoyaltySnapshot) -> CartTotals {
    let subtotal = subtotal(cart);
    let total_quantity = cart.total_quantity();

    let volume_discount_per_unit = volume_discount_per_unit(total_quantity);
    let volume_discount = volume_discount_per_unit * total_quantity;

    let cash_savings = if cart.payment_method == PaymentMethod::Cash {
        cart.lines
            .iter()
            .map(|l| (l.unit_card_price - l.unit_cash_price) * l.quantity)
            .sum::<i64>()
            .max(0)
    } else {
        0
    };

    let loyalty_discount = loyalty::tier_discount(subtotal, account.discount_tier_percent);

    let redemption_cap = loyalty::redemption_cap(subtotal, account.coin_balance);
    let coins_redeemed =
        loyalty::clamp_redemption(cart.coins_to_redeem, subtotal, account.coin_balance);
    let coins_earned = loyalty::cashback(subtotal, coins_redeemed);

    let total = (subtotal - volume_discount - loyalty_discount - coins_redeemed).max(0);

    CartTotals {
        subtotal,
        total_quantity,
        volume_discount_per_unit,
        volume_discount,
        free_unit_eligible: total_quantity >= FREE_UNIT_THRESHOLD,
        cash_savings,
        loyalty_discount,
        redemption_cap,
        coins_redeemed,
        coins_earned,
        total,
    }
}

#[cfg(test)]
mod tests;
