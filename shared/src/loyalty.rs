//! Loyalty math
//!
//! Pure functions for the tiered-discount and coin programs. The cart
//! pricing engine and the checkout path both use these, so the preview a
//! client sees and the state the server persists can never drift.

/// Lifetime-spend thresholds and their discount percentages, highest
/// first. Tier is monotonic in lifetime spend.
const TIER_THRESHOLDS: &[(i64, i64)] = &[(59_000, 10), (44_000, 5), (24_000, 3)];

/// Cashback accrual rate in permille (1.5% of subtotal).
const CASHBACK_PERMILLE: i64 = 15;

/// Discount tier percentage for a given lifetime spend.
///
/// Boundary values are inclusive: spending exactly 44000 unlocks 5%.
pub fn tier_percent(lifetime_spend: i64) -> i64 {
    TIER_THRESHOLDS
        .iter()
        .find(|(threshold, _)| lifetime_spend >= *threshold)
        .map(|(_, percent)| *percent)
        .unwrap_or(0)
}

/// Loyalty discount for a subtotal at a given tier (integer floor).
pub fn tier_discount(subtotal: i64, tier_percent: i64) -> i64 {
    subtotal * tier_percent / 100
}

/// Maximum coins redeemable against a subtotal: at most half the
/// subtotal, and never more than the account holds.
pub fn redemption_cap(subtotal: i64, coin_balance: i64) -> i64 {
    (subtotal / 2).min(coin_balance).max(0)
}

/// Clamp a requested redemption into `[0, cap]`. Out-of-range requests
/// (including negative ones) are clamped, not rejected.
pub fn clamp_redemption(requested: i64, subtotal: i64, coin_balance: i64) -> i64 {
    requested.clamp(0, redemption_cap(subtotal, coin_balance))
}

/// Coins earned on an order. Redemption and accrual are mutually
/// exclusive: any redeemed coins force the cashback to zero.
pub fn cashback(subtotal: i64, coins_redeemed: i64) -> i64 {
    if coins_redeemed > 0 {
        0
    } else {
        subtotal * CASHBACK_PERMILLE / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(tier_percent(0), 0);
        assert_eq!(tier_percent(23_999), 0);
        assert_eq!(tier_percent(24_000), 3);
        assert_eq!(tier_percent(43_999), 3);
        assert_eq!(tier_percent(44_000), 5);
        assert_eq!(tier_percent(58_999), 5);
        assert_eq!(tier_percent(59_000), 10);
        assert_eq!(tier_percent(1_000_000), 10);
    }

    #[test]
    fn tier_is_monotonic() {
        let mut last = 0;
        for spend in (0..80_000).step_by(500) {
            let t = tier_percent(spend);
            assert!(t >= last, "tier dropped at spend={spend}");
            last = t;
        }
    }

    #[test]
    fn redemption_cap_respects_balance_and_subtotal() {
        assert_eq!(redemption_cap(200, 1000), 100); // half the subtotal
        assert_eq!(redemption_cap(200, 30), 30); // balance-bound
        assert_eq!(redemption_cap(0, 1000), 0);
        assert_eq!(redemption_cap(201, 1000), 100); // floor of 201/2
    }

    #[test]
    fn clamp_redemption_handles_out_of_range_input() {
        assert_eq!(clamp_redemption(-5, 200, 1000), 0);
        assert_eq!(clamp_redemption(999, 200, 1000), 100);
        assert_eq!(clamp_redemption(40, 200, 1000), 40);
    }

    #[test]
    fn cashback_is_exclusive_with_redemption() {
        assert_eq!(cashback(200, 0), 3); // floor(200 * 0.015)
        assert_eq!(cashback(200, 1), 0);
        assert_eq!(cashback(200, 50), 0);
        assert_eq!(cashback(0, 0), 0);
    }
}
