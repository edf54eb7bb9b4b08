use super::*;

fn line(product_id: i64, quantity: i64, cash: i64, card: i64) -> CartLine {
    CartLine {
        product_id,
        name: format!("Product {}", product_id),
        quantity,
        unit_cash_price: cash,
        unit_card_price: card,
        payment_override: None,
    }
}

fn account(balance: i64, tier: i64) -> LoyaltySnapshot {
    LoyaltySnapshot {
        coin_balance: balance,
        lifetime_spend: 0,
        order_count: 0,
        discount_tier_percent: tier,
    }
}

#[test]
fn empty_cart_has_zero_totals() {
    let cart = Cart::new();
    let totals = cart.totals(&account(500, 10));
    assert_eq!(totals, CartTotals::default());
}

#[test]
fn cash_cart_scenario_without_redemption() {
    // 2 units priced cash=100/card=120, cash payment, no redemption,
    // no loyalty tier.
    let mut cart = Cart::new();
    cart.add_line(line(1, 2, 100, 120));

    let totals = cart.totals(&account(0, 0));
    assert_eq!(totals.subtotal, 200);
    assert_eq!(totals.volume_discount_per_unit, 30);
    assert_eq!(totals.volume_discount, 60);
    assert_eq!(totals.cash_savings, 40); // (120 - 100) * 2
    assert_eq!(totals.loyalty_discount, 0);
    assert_eq!(totals.coins_earned, 3); // floor(200 * 0.015)
    assert_eq!(totals.total, 140);
    assert!(!totals.free_unit_eligible);
}

#[test]
fn cash_cart_scenario_with_redemption() {
    // Same cart, but redeeming 50 coins: cashback drops to zero.
    let mut cart = Cart::new();
    cart.add_line(line(1, 2, 100, 120));
    cart.set_coins_to_redeem(50, &account(500, 0));

    let totals = cart.totals(&account(500, 0));
    assert_eq!(totals.coins_redeemed, 50);
    assert_eq!(totals.coins_earned, 0);
    assert_eq!(totals.total, 90); // max(0, 200 - 60 - 0 - 50)
}

#[test]
fn volume_discount_steps_on_total_quantity() {
    for (qty, per_unit) in [
        (0, 0),
        (1, 0),
        (2, 30),
        (3, 30),
        (4, 30),
        (5, 50),
        (6, 50),
        (7, 60),
        (12, 60),
    ] {
        assert_eq!(
            volume_discount_per_unit(qty),
            per_unit,
            "wrong step at quantity {qty}"
        );
    }
}

#[test]
fn volume_discount_is_non_decreasing() {
    let mut last = 0;
    for qty in 0..50 {
        let d = volume_discount_per_unit(qty);
        assert!(d >= last, "discount decreased at qty={qty}");
        last = d;
    }
}

#[test]
fn volume_discount_spans_all_lines() {
    // 3 + 4 units of different products cross the 7-unit step together.
    let mut cart = Cart::new();
    cart.add_line(line(1, 3, 100, 120));
    cart.add_line(line(2, 4, 200, 220));

    let totals = cart.totals(&account(0, 0));
    assert_eq!(totals.total_quantity, 7);
    assert_eq!(totals.volume_discount, 60 * 7);
    assert!(totals.free_unit_eligible);
}

#[test]
fn free_unit_flag_unlocks_at_five_units() {
    let mut cart = Cart::new();
    cart.add_line(line(1, 4, 100, 120));
    assert!(!cart.totals(&account(0, 0)).free_unit_eligible);

    cart.set_quantity(1, 5);
    assert!(cart.totals(&account(0, 0)).free_unit_eligible);
}

#[test]
fn cash_savings_only_apply_to_cash_payment() {
    let mut cart = Cart::new();
    cart.add_line(line(1, 2, 100, 120));

    cart.set_payment_method(PaymentMethod::Card);
    let totals = cart.totals(&account(0, 0));
    assert_eq!(totals.subtotal, 240);
    assert_eq!(totals.cash_savings, 0);

    cart.set_payment_method(PaymentMethod::Cash);
    assert_eq!(cart.totals(&account(0, 0)).cash_savings, 40);
}

#[test]
fn mixed_mode_prices_each_line_by_override() {
    let mut cart = Cart::new();
    cart.add_line(line(1, 1, 100, 120));
    cart.add_line(line(2, 1, 200, 230));
    cart.set_payment_method(PaymentMethod::Mixed);
    cart.set_line_override(1, Some(PaymentChoice::Cash));
    // Line 2 has no override: defaults to the card list.

    let totals = cart.totals(&account(0, 0));
    assert_eq!(totals.subtotal, 100 + 230);
}

#[test]
fn leaving_mixed_mode_drops_overrides() {
    let mut cart = Cart::new();
    cart.add_line(line(1, 1, 100, 120));
    cart.set_payment_method(PaymentMethod::Mixed);
    cart.set_line_override(1, Some(PaymentChoice::Cash));

    cart.set_payment_method(PaymentMethod::Card);
    assert!(cart.lines[0].payment_override.is_none());

    // Back in mixed mode every line is on the card list again.
    cart.set_payment_method(PaymentMethod::Mixed);
    assert_eq!(cart.totals(&account(0, 0)).subtotal, 120);
}

#[test]
fn loyalty_discount_uses_account_tier() {
    let mut cart = Cart::new();
    cart.add_line(line(1, 1, 1000, 1000));

    let totals = cart.totals(&account(0, 10));
    assert_eq!(totals.loyalty_discount, 100);
    assert_eq!(totals.total, 900);
}

#[test]
fn redemption_is_clamped_not_rejected() {
    let mut cart = Cart::new();
    cart.add_line(line(1, 1, 200, 200));

    // Over-cap request clamps to min(balance, subtotal/2).
    cart.set_coins_to_redeem(10_000, &account(70, 0));
    assert_eq!(cart.coins_to_redeem, 70);

    // Negative request clamps to zero.
    cart.set_coins_to_redeem(-10, &account(70, 0));
    assert_eq!(cart.coins_to_redeem, 0);

    // Balance larger than half the subtotal: subtotal bound wins.
    cart.set_coins_to_redeem(10_000, &account(5_000, 0));
    assert_eq!(cart.coins_to_redeem, 100);
}

#[test]
fn stale_redemption_request_is_reclamped_at_totals_time() {
    // Redemption was set while the cart was bigger; shrinking the cart
    // must not let the stored value exceed the new cap.
    let mut cart = Cart::new();
    cart.add_line(line(1, 4, 100, 100));
    cart.set_coins_to_redeem(200, &account(1_000, 0));
    assert_eq!(cart.coins_to_redeem, 200);

    cart.set_quantity(1, 1);
    let totals = cart.totals(&account(1_000, 0));
    assert_eq!(totals.coins_redeemed, 50); // floor(100 / 2)
}

#[test]
fn total_is_never_negative() {
    // 2 units at 30/30: subtotal 60, volume discount 60, redeeming more
    // than the remainder would go negative without the clamp.
    let mut cart = Cart::new();
    cart.add_line(line(1, 2, 30, 30));
    cart.set_coins_to_redeem(30, &account(30, 0));

    let totals = cart.totals(&account(30, 0));
    assert_eq!(totals.subtotal, 60);
    assert_eq!(totals.volume_discount, 60);
    assert_eq!(totals.total, 0);
}

#[test]
fn add_line_merges_duplicate_products() {
    let mut cart = Cart::new();
    cart.add_line(line(1, 1, 100, 120));
    cart.add_line(line(1, 2, 100, 120));

    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].quantity, 3);
}

#[test]
fn zero_quantity_removes_the_line() {
    let mut cart = Cart::new();
    cart.add_line(line(1, 2, 100, 120));
    cart.set_quantity(1, 0);
    assert!(cart.is_empty());
}
