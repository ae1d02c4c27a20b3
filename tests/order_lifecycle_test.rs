//! End-to-end order lifecycle: creation with price snapshots, line
//! merging, fixed-rate totals, stage-by-stage progression, payment
//! idempotency guard, and cancellation rules.

mod common;

use axum::http::{Method, StatusCode};
use common::{expect_data, TestApp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

struct Menu {
    outlet_id: String,
    coffee_id: String,
    cake_id: String,
}

async fn seed_menu(app: &TestApp) -> Menu {
    let outlet = expect_data(
        app.request(
            Method::POST,
            "/api/v1/outlets",
            Some(json!({
                "name": "Lobby Cafe",
                "outlet_type": "cafe"
            })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let outlet_id = outlet["id"].as_str().unwrap().to_string();

    let category = expect_data(
        app.request(
            Method::POST,
            "/api/v1/item-categories",
            Some(json!({
                "name": "Drinks",
                "outlet_id": outlet_id
            })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let category_id = category["id"].as_str().unwrap().to_string();

    let coffee = expect_data(
        app.request(
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Coffee",
                "outlet_id": outlet_id,
                "category_id": category_id,
                "price": "4.50"
            })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let cake = expect_data(
        app.request(
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Cake",
                "outlet_id": outlet_id,
                "price": "6.00"
            })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    Menu {
        outlet_id,
        coffee_id: coffee["id"].as_str().unwrap().to_string(),
        cake_id: cake["id"].as_str().unwrap().to_string(),
    }
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

async fn create_order(app: &TestApp, menu: &Menu, lines: Value) -> Value {
    expect_data(
        app.request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "outlet_id": menu.outlet_id,
                "order_type": "dine_in",
                "table_number": "7",
                "order_lines": lines
            })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await
}

async fn advance(app: &TestApp, order_id: &str, action: &str) -> StatusCode {
    app.request(
        Method::POST,
        &format!("/api/v1/orders/{}/{}", order_id, action),
        None,
        Some(&app.cashier_token),
    )
    .await
    .status()
}

#[tokio::test]
async fn totals_follow_fixed_tax_rate() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    let order = create_order(
        &app,
        &menu,
        json!([
            { "item_id": menu.coffee_id, "quantity": 2 },
            { "item_id": menu.cake_id, "quantity": 1 }
        ]),
    )
    .await;

    // subtotal 2×4.50 + 6.00 = 15.00; tax 1.50; total 16.50
    assert_eq!(decimal(&order["subtotal"]), dec!(15.00));
    assert_eq!(decimal(&order["tax_amount"]), dec!(1.50));
    assert_eq!(decimal(&order["total_amount"]), dec!(16.50));
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_status"], "pending");
    assert!(order["order_number"].as_str().unwrap().starts_with("ORD-"));

    let summary = expect_data(
        app.request(
            Method::GET,
            &format!("/api/v1/orders/{}/summary", order["id"].as_str().unwrap()),
            None,
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(summary["outlet"], "Lobby Cafe");
    assert_eq!(summary["guest"], "Walk-in");
    assert_eq!(summary["items_count"], 2);
    assert_eq!(decimal(&summary["total_amount"]), dec!(16.50));
}

#[tokio::test]
async fn adding_same_item_merges_lines() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    let order = create_order(
        &app,
        &menu,
        json!([{ "item_id": menu.coffee_id, "quantity": 1 }]),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    let updated = expect_data(
        app.request(
            Method::POST,
            &format!("/api/v1/orders/{}/lines", order_id),
            Some(json!({ "item_id": menu.coffee_id, "quantity": 2 })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(decimal(&updated["subtotal"]), dec!(13.50));

    let lines = expect_data(
        app.request(
            Method::GET,
            &format!("/api/v1/orders/{}/lines", order_id),
            None,
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    let lines = lines.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 3);
    assert_eq!(decimal(&lines[0]["line_total"]), dec!(13.50));
}

#[tokio::test]
async fn menu_price_changes_do_not_touch_existing_lines() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    let order = create_order(
        &app,
        &menu,
        json!([{ "item_id": menu.coffee_id, "quantity": 2 }]),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    app.request(
        Method::PUT,
        &format!("/api/v1/items/{}", menu.coffee_id),
        Some(json!({ "price": "9.99" })),
        Some(&app.cashier_token),
    )
    .await;

    let lines = expect_data(
        app.request(
            Method::GET,
            &format!("/api/v1/orders/{}/lines", order_id),
            None,
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    // Unit price stays at the snapshot taken when the line was created
    assert_eq!(decimal(&lines[0]["unit_price"]), dec!(4.50));
    assert_eq!(decimal(&lines[0]["line_total"]), dec!(9.00));
}

#[tokio::test]
async fn status_progression_cannot_skip_stages() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    let order = create_order(
        &app,
        &menu,
        json!([{ "item_id": menu.cake_id, "quantity": 1 }]),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    // pending → ready skips confirmed/preparing
    assert_eq!(advance(&app, order_id, "ready").await, StatusCode::BAD_REQUEST);

    assert_eq!(advance(&app, order_id, "confirm").await, StatusCode::OK);
    // confirming twice fails
    assert_eq!(advance(&app, order_id, "confirm").await, StatusCode::BAD_REQUEST);

    assert_eq!(advance(&app, order_id, "prepare").await, StatusCode::OK);
    assert_eq!(advance(&app, order_id, "ready").await, StatusCode::OK);
    assert_eq!(advance(&app, order_id, "serve").await, StatusCode::OK);

    let order = expect_data(
        app.request(
            Method::GET,
            &format!("/api/v1/orders/{}", order_id),
            None,
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(order["status"], "served");
}

#[tokio::test]
async fn line_mutation_locked_after_confirmation_stage() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    let order = create_order(
        &app,
        &menu,
        json!([{ "item_id": menu.coffee_id, "quantity": 1 }]),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    advance(&app, order_id, "confirm").await;
    advance(&app, order_id, "prepare").await;

    let add = app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/lines", order_id),
            Some(json!({ "item_id": menu.cake_id, "quantity": 1 })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(add.status(), StatusCode::BAD_REQUEST);

    let remove = app
        .request(
            Method::DELETE,
            &format!("/api/v1/orders/{}/lines/{}", order_id, menu.coffee_id),
            None,
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(remove.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payment_is_guarded_against_double_processing() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    let order = create_order(
        &app,
        &menu,
        json!([{ "item_id": menu.cake_id, "quantity": 2 }]),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    let paid = expect_data(
        app.request(
            Method::POST,
            &format!("/api/v1/orders/{}/pay", order_id),
            Some(json!({ "payment_method": "card" })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["payment_status"], "paid");
    assert_eq!(paid["payment_method"], "card");

    let again = app
        .request(
            Method::POST,
            &format!("/api/v1/orders/{}/pay", order_id),
            Some(json!({ "payment_method": "cash" })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn served_and_paid_orders_cannot_be_cancelled() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    let order = create_order(
        &app,
        &menu,
        json!([{ "item_id": menu.coffee_id, "quantity": 1 }]),
    )
    .await;
    let order_id = order["id"].as_str().unwrap();

    advance(&app, order_id, "confirm").await;
    advance(&app, order_id, "prepare").await;
    advance(&app, order_id, "ready").await;
    advance(&app, order_id, "serve").await;

    assert_eq!(advance(&app, order_id, "cancel").await, StatusCode::BAD_REQUEST);

    // A fresh pending order cancels fine
    let other = create_order(
        &app,
        &menu,
        json!([{ "item_id": menu.coffee_id, "quantity": 1 }]),
    )
    .await;
    assert_eq!(
        advance(&app, other["id"].as_str().unwrap(), "cancel").await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn order_rejects_unavailable_items_and_bad_quantities() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    app.request(
        Method::PUT,
        &format!("/api/v1/items/{}/availability", menu.cake_id),
        Some(json!({ "is_available": false })),
        Some(&app.cashier_token),
    )
    .await;

    let unavailable = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "outlet_id": menu.outlet_id,
                "order_lines": [{ "item_id": menu.cake_id, "quantity": 1 }]
            })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(unavailable.status(), StatusCode::BAD_REQUEST);

    let zero_quantity = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "outlet_id": menu.outlet_id,
                "order_lines": [{ "item_id": menu.coffee_id, "quantity": 0 }]
            })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(zero_quantity.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fnb_routes_reject_receptionists() {
    let app = TestApp::new().await;
    let menu = seed_menu(&app).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "outlet_id": menu.outlet_id,
                "order_lines": []
            })),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
