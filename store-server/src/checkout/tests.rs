use super::*;
use crate::core::{Config, NotifyConfig, ServerState};
use crate::db::DbService;
use shared::models::CheckoutLine;

async fn test_state() -> ServerState {
    let db = DbService::new_in_memory().await.expect("in-memory db");
    let config = Config {
        work_dir: ".".into(),
        http_port: 0,
        environment: "test".into(),
        stock_sweep_interval_secs: 300,
        notify: NotifyConfig::default(),
    };
    ServerState::with_pool(config, db.pool)
}

async fn seed_product(state: &ServerState, id: i64, cash: i64, card: i64) {
    sqlx::query(
        "INSERT INTO product (id, name, cash_price, card_price, sort_order, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, 0, 1, 0, 0)",
    )
    .bind(id)
    .bind(format!("Product {id}"))
    .bind(cash)
    .bind(card)
    .execute(&state.pool)
    .await
    .expect("seed product");
}

async fn seed_client(state: &ServerState, id: i64, balance: i64, lifetime_spend: i64, tier: i64) {
    sqlx::query(
        "INSERT INTO client (id, name, coin_balance, lifetime_spend, order_count, discount_tier_percent, created_at, updated_at) VALUES (?, ?, ?, ?, 0, ?, 0, 0)",
    )
    .bind(id)
    .bind(format!("Client {id}"))
    .bind(balance)
    .bind(lifetime_spend)
    .bind(tier)
    .execute(&state.pool)
    .await
    .expect("seed client");
}

async fn seed_location(state: &ServerState, id: i64, name: &str) {
    sqlx::query("INSERT INTO location (id, name, is_active) VALUES (?, ?, 1)")
        .bind(id)
        .bind(name)
        .execute(&state.pool)
        .await
        .expect("seed location");
}

async fn stock_quantity(state: &ServerState, product_id: i64, location_id: i64) -> Option<i64> {
    inventory::find(&state.pool, product_id, location_id)
        .await
        .expect("inventory lookup")
        .map(|r| r.quantity)
}

fn cash_request(client_id: i64, location_id: Option<i64>, quantity: i64) -> CheckoutRequest {
    CheckoutRequest {
        client_id,
        location_id,
        payment_method: PaymentMethod::Cash,
        lines: vec![CheckoutLine {
            product_id: 1,
            quantity,
            payment_override: None,
        }],
        coins_to_redeem: 0,
        comment: None,
        expected_total: None,
        request_key: None,
    }
}

#[tokio::test]
async fn checkout_commits_order_inventory_and_loyalty() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_client(&state, 42, 0, 0, 0).await;
    seed_location(&state, 7, "Centro").await;
    inventory::set_quantity(&state.pool, 1, 7, 10)
        .await
        .expect("seed inventory");

    let resp = process_checkout(&state, cash_request(42, Some(7), 2))
        .await
        .expect("checkout");

    // Totals per the worked scenario: 2 × (cash 100 / card 120).
    let order = &resp.order;
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.subtotal, 200);
    assert_eq!(order.volume_discount, 60);
    assert_eq!(order.cash_savings, 40);
    assert_eq!(order.loyalty_discount, 0);
    assert_eq!(order.coins_earned, 3);
    assert_eq!(order.total, 140);

    // Order persisted with its frozen lines.
    let stored = order::find_by_id(&state.pool, order.id)
        .await
        .expect("order lookup")
        .expect("order exists");
    assert_eq!(stored.lines.len(), 1);
    assert_eq!(stored.lines[0].unit_price, 100);
    assert_eq!(stored.lines[0].line_total, 200);

    // Inventory decremented.
    assert_eq!(stock_quantity(&state, 1, 7).await, Some(8));

    // Loyalty recomputed: lifetime +140, one order, 3 coins cashback.
    let loyalty = resp.loyalty.expect("loyalty snapshot");
    assert_eq!(loyalty.lifetime_spend, 140);
    assert_eq!(loyalty.order_count, 1);
    assert_eq!(loyalty.coin_balance, 3);
    assert_eq!(loyalty.discount_tier_percent, 0);
}

#[tokio::test]
async fn missing_client_id_is_rejected() {
    let state = test_state().await;
    let result = process_checkout(&state, cash_request(0, None, 1)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn empty_line_list_is_rejected() {
    let state = test_state().await;
    let mut req = cash_request(42, None, 1);
    req.lines.clear();
    let result = process_checkout(&state, req).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn unknown_product_is_rejected_before_any_write() {
    let state = test_state().await;
    seed_client(&state, 42, 0, 0, 0).await;

    let result = process_checkout(&state, cash_request(42, None, 1)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let orders = order::find_by_client(&state.pool, 42, 10, 0)
        .await
        .expect("order list");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn oversized_decrement_clamps_stock_to_zero() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_client(&state, 42, 0, 0, 0).await;
    seed_location(&state, 7, "Centro").await;
    inventory::set_quantity(&state.pool, 1, 7, 3)
        .await
        .expect("seed inventory");

    let resp = process_checkout(&state, cash_request(42, Some(7), 10))
        .await
        .expect("checkout");

    // Decrementing 10 from on-hand 3 yields 0, not -7, and the order
    // still goes through.
    assert_eq!(stock_quantity(&state, 1, 7).await, Some(0));
    assert_eq!(resp.order.status, OrderStatus::New);
}

#[tokio::test]
async fn missing_inventory_rows_are_skipped_silently() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_client(&state, 42, 0, 0, 0).await;
    seed_location(&state, 7, "Centro").await;

    let resp = process_checkout(&state, cash_request(42, Some(7), 2))
        .await
        .expect("checkout");

    assert_eq!(resp.order.total, 140);
    // No inventory record was created as a side effect.
    assert_eq!(stock_quantity(&state, 1, 7).await, None);
}

#[tokio::test]
async fn guest_checkout_returns_no_loyalty_snapshot() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;

    // Client 99 has no record; coins requested clamp against a zero
    // balance.
    let mut req = cash_request(99, None, 2);
    req.coins_to_redeem = 50;
    let resp = process_checkout(&state, req).await.expect("checkout");

    assert!(resp.loyalty.is_none());
    assert_eq!(resp.order.coins_redeemed, 0);
    assert_eq!(resp.order.coins_earned, 3);
    assert_eq!(resp.order.status, OrderStatus::Preorder);
}

#[tokio::test]
async fn redemption_is_clamped_and_suppresses_cashback() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_client(&state, 42, 70, 0, 0).await;

    let mut req = cash_request(42, None, 2);
    req.coins_to_redeem = 10_000; // over-cap: clamps to min(70, 100)

    let resp = process_checkout(&state, req).await.expect("checkout");
    assert_eq!(resp.order.coins_redeemed, 70);
    assert_eq!(resp.order.coins_earned, 0);
    assert_eq!(resp.order.total, 70); // 200 - 60 - 0 - 70

    let loyalty = resp.loyalty.expect("loyalty snapshot");
    assert_eq!(loyalty.coin_balance, 0);
}

#[tokio::test]
async fn stale_expected_total_is_rejected() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_client(&state, 42, 0, 0, 0).await;

    let mut req = cash_request(42, None, 2);
    req.expected_total = Some(999);

    let result = process_checkout(&state, req).await;
    assert!(matches!(result, Err(AppError::BusinessRule(_))));

    let orders = order::find_by_client(&state.pool, 42, 10, 0)
        .await
        .expect("order list");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn matching_expected_total_passes() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_client(&state, 42, 0, 0, 0).await;

    let mut req = cash_request(42, None, 2);
    req.expected_total = Some(140);

    let resp = process_checkout(&state, req).await.expect("checkout");
    assert_eq!(resp.order.total, 140);
}

#[tokio::test]
async fn duplicate_request_key_returns_the_original_order() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_client(&state, 42, 0, 0, 0).await;

    let mut req = cash_request(42, None, 2);
    req.request_key = Some("req-abc".into());

    let first = process_checkout(&state, req.clone()).await.expect("checkout");
    let second = process_checkout(&state, req).await.expect("replay");

    assert_eq!(first.order.id, second.order.id);

    // The replay changed nothing: one order, loyalty counted once.
    let orders = order::find_by_client(&state.pool, 42, 10, 0)
        .await
        .expect("order list");
    assert_eq!(orders.len(), 1);
    let loyalty = second.loyalty.expect("loyalty snapshot");
    assert_eq!(loyalty.order_count, 1);
}

#[tokio::test]
async fn tier_upgrades_when_lifetime_spend_crosses_a_boundary() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    // 43_900 spent so far at tier 3; this order's 140 crosses 44_000.
    seed_client(&state, 42, 0, 43_900, 3).await;

    let resp = process_checkout(&state, cash_request(42, None, 2))
        .await
        .expect("checkout");

    // The order itself was priced at the pre-order tier.
    assert_eq!(resp.order.loyalty_discount, 200 * 3 / 100);

    let loyalty = resp.loyalty.expect("loyalty snapshot");
    assert_eq!(loyalty.lifetime_spend, 44_034); // 43_900 + (200-60-6)
    assert_eq!(loyalty.discount_tier_percent, 5);
}

#[tokio::test]
async fn mixed_payment_prices_lines_by_override() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_product(&state, 2, 200, 230).await;
    seed_client(&state, 42, 0, 0, 0).await;

    let req = CheckoutRequest {
        client_id: 42,
        location_id: None,
        payment_method: PaymentMethod::Mixed,
        lines: vec![
            CheckoutLine {
                product_id: 1,
                quantity: 1,
                payment_override: Some(shared::cart::PaymentChoice::Cash),
            },
            CheckoutLine {
                product_id: 2,
                quantity: 1,
                payment_override: None,
            },
        ],
        coins_to_redeem: 0,
        comment: None,
        expected_total: None,
        request_key: None,
    };

    let resp = process_checkout(&state, req).await.expect("checkout");
    // Line 1 at cash 100, line 2 defaults to card 230; 2 units => 30/unit.
    assert_eq!(resp.order.subtotal, 330);
    assert_eq!(resp.order.volume_discount, 60);
    assert_eq!(resp.order.cash_savings, 0);
    assert_eq!(resp.order.lines[0].unit_price, 100);
    assert_eq!(resp.order.lines[1].unit_price, 230);
}

#[tokio::test]
async fn unknown_pickup_location_is_rejected() {
    let state = test_state().await;
    seed_product(&state, 1, 100, 120).await;
    seed_client(&state, 42, 0, 0, 0).await;

    let result = process_checkout(&state, cash_request(42, Some(999), 1)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}
