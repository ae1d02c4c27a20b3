//! Analytics snapshots computed over seeded operational data: revenue,
//! occupancy, revenue split, ARPR, top items, outlet performance, and
//! the composed dashboard.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{expect_data, TestApp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

async fn get(app: &TestApp, path: &str) -> Value {
    expect_data(
        app.request(Method::GET, path, None, Some(&app.admin_token)).await,
        StatusCode::OK,
    )
    .await
}

/// 10 rooms: 4 occupied, 2 maintenance, 1 cleaning, 3 available.
async fn seed_rooms(app: &TestApp) -> Vec<String> {
    let room_type = expect_data(
        app.request(
            Method::POST,
            "/api/v1/room-types",
            Some(json!({
                "name": "Standard",
                "base_price": "100.00",
                "max_occupancy": 2
            })),
            Some(&app.admin_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let room_type_id = room_type["id"].as_str().unwrap().to_string();

    let mut ids = Vec::new();
    for n in 0..10 {
        let room = expect_data(
            app.request(
                Method::POST,
                "/api/v1/rooms",
                Some(json!({
                    "room_number": format!("{}", 500 + n),
                    "room_type_id": room_type_id,
                    "floor_number": 5
                })),
                Some(&app.admin_token),
            )
            .await,
            StatusCode::CREATED,
        )
        .await;
        ids.push(room["id"].as_str().unwrap().to_string());
    }

    for (idx, status) in [(0, "occupied"), (1, "occupied"), (2, "occupied"), (3, "occupied"),
        (4, "maintenance"), (5, "maintenance"), (6, "cleaning")]
    {
        app.request(
            Method::PUT,
            &format!("/api/v1/rooms/{}/status", ids[idx]),
            Some(json!({ "status": status })),
            Some(&app.admin_token),
        )
        .await;
    }

    ids
}

async fn record_payment(app: &TestApp, amount: &str, payment_type: &str) {
    let response = app
        .request(
            Method::POST,
            "/api/v1/payments",
            Some(json!({
                "amount": amount,
                "payment_method": "card",
                "payment_type": payment_type
            })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn occupancy_rate_excludes_maintenance_rooms() {
    let app = TestApp::new().await;
    seed_rooms(&app).await;

    let snapshot = get(&app, "/api/v1/analytics/occupancy-rate").await;
    assert_eq!(snapshot["total_rooms"], 10);
    assert_eq!(snapshot["occupied_rooms"], 4);
    assert_eq!(snapshot["maintenance_rooms"], 2);
    assert_eq!(snapshot["cleaning_rooms"], 1);
    assert_eq!(snapshot["available_rooms"], 3);
    // 4 / (10 - 2) × 100
    assert_eq!(snapshot["occupancy_rate"], 50.0);
}

#[tokio::test]
async fn revenue_today_and_split_break_down_by_type() {
    let app = TestApp::new().await;
    record_payment(&app, "100.00", "room_charge").await;
    record_payment(&app, "50.00", "fnb_charge").await;

    let revenue = get(&app, "/api/v1/analytics/revenue-today").await;
    assert_eq!(decimal(&revenue["total_revenue"]), dec!(150.00));
    assert_eq!(decimal(&revenue["room_revenue"]), dec!(100.00));
    assert_eq!(decimal(&revenue["fnb_revenue"]), dec!(50.00));

    let split = get(&app, "/api/v1/analytics/revenue-split").await;
    assert_eq!(decimal(&split["total_revenue"]), dec!(150.00));
    let items = split["split"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["category"], "Rooms");
    assert_eq!(decimal(&items[0]["amount"]), dec!(100.00));
    assert_eq!(items[0]["percentage"], 66.67);
    assert_eq!(items[1]["category"], "F&B");
    assert_eq!(decimal(&items[1]["amount"]), dec!(50.00));
    assert_eq!(items[1]["percentage"], 33.33);
}

#[tokio::test]
async fn pending_and_failed_payments_are_excluded() {
    let app = TestApp::new().await;
    record_payment(&app, "100.00", "room_charge").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/payments",
            Some(json!({
                "amount": "999.00",
                "payment_method": "card",
                "payment_type": "room_charge",
                "status": "pending"
            })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let revenue = get(&app, "/api/v1/analytics/revenue-today").await;
    assert_eq!(decimal(&revenue["total_revenue"]), dec!(100.00));
}

#[tokio::test]
async fn arpr_divides_room_revenue_by_occupied_rooms() {
    let app = TestApp::new().await;
    seed_rooms(&app).await;

    record_payment(&app, "300.00", "room_charge").await;
    record_payment(&app, "100.00", "room_charge").await;
    record_payment(&app, "75.00", "fnb_charge").await;

    let snapshot = get(&app, "/api/v1/analytics/arpr").await;
    // 400 room revenue across 4 occupied rooms
    assert_eq!(decimal(&snapshot["arpr"]), dec!(100.00));
    assert_eq!(decimal(&snapshot["total_revenue"]), dec!(400.00));
    assert_eq!(snapshot["occupied_rooms"], 4);
}

#[tokio::test]
async fn arpr_is_zero_with_no_occupied_rooms() {
    let app = TestApp::new().await;
    record_payment(&app, "500.00", "room_charge").await;

    let snapshot = get(&app, "/api/v1/analytics/arpr").await;
    assert_eq!(decimal(&snapshot["arpr"]), Decimal::ZERO);
    assert_eq!(snapshot["occupied_rooms"], 0);
}

async fn seed_served_orders(app: &TestApp) -> (String, String) {
    let outlet = expect_data(
        app.request(
            Method::POST,
            "/api/v1/outlets",
            Some(json!({ "name": "Pool Bar", "outlet_type": "bar" })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let outlet_id = outlet["id"].as_str().unwrap().to_string();

    let mojito = expect_data(
        app.request(
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Mojito",
                "outlet_id": outlet_id,
                "price": "12.00"
            })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let wings = expect_data(
        app.request(
            Method::POST,
            "/api/v1/items",
            Some(json!({
                "name": "Wings",
                "outlet_id": outlet_id,
                "price": "9.00"
            })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let mojito_id = mojito["id"].as_str().unwrap().to_string();
    let wings_id = wings["id"].as_str().unwrap().to_string();

    // Served order: 5 mojitos, 2 wings. Pending order (excluded): 9 wings.
    let served = expect_data(
        app.request(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "outlet_id": outlet_id,
                "order_lines": [
                    { "item_id": mojito_id, "quantity": 5 },
                    { "item_id": wings_id, "quantity": 2 }
                ]
            })),
            Some(&app.cashier_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let served_id = served["id"].as_str().unwrap();
    for action in ["confirm", "prepare", "ready", "serve"] {
        app.request(
            Method::POST,
            &format!("/api/v1/orders/{}/{}", served_id, action),
            None,
            Some(&app.cashier_token),
        )
        .await;
    }

    app.request(
        Method::POST,
        "/api/v1/orders",
        Some(json!({
            "outlet_id": outlet_id,
            "order_lines": [{ "item_id": wings_id, "quantity": 9 }]
        })),
        Some(&app.cashier_token),
    )
    .await;

    (outlet_id, mojito_id)
}

#[tokio::test]
async fn top_items_count_only_served_and_paid_orders() {
    let app = TestApp::new().await;
    let (_, mojito_id) = seed_served_orders(&app).await;

    let snapshot = get(&app, "/api/v1/analytics/top-items-sold").await;
    let items = snapshot["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);

    // Mojito leads with quantity 5; the pending 9-wing order is invisible
    assert_eq!(items[0]["item_id"], mojito_id.as_str());
    assert_eq!(items[0]["item_name"], "Mojito");
    assert_eq!(items[0]["outlet_name"], "Pool Bar");
    assert_eq!(items[0]["quantity_sold"], 5);
    assert_eq!(decimal(&items[0]["revenue"]), dec!(60.00));
    assert_eq!(items[1]["item_name"], "Wings");
    assert_eq!(items[1]["quantity_sold"], 2);
}

#[tokio::test]
async fn outlet_performance_includes_zero_order_outlets() {
    let app = TestApp::new().await;
    let (outlet_id, _) = seed_served_orders(&app).await;

    // An outlet with no orders at all
    app.request(
        Method::POST,
        "/api/v1/outlets",
        Some(json!({ "name": "Quiet Cafe", "outlet_type": "cafe" })),
        Some(&app.cashier_token),
    )
    .await;

    let snapshot = get(&app, "/api/v1/analytics/outlet-performance").await;
    let outlets = snapshot["outlets"].as_array().unwrap();
    assert_eq!(outlets.len(), 2);

    let bar = outlets
        .iter()
        .find(|o| o["outlet_id"] == outlet_id.as_str())
        .unwrap();
    assert_eq!(bar["total_orders"], 1);
    // 5×12 + 2×9 = 78 subtotal, +10% tax = 85.80
    assert_eq!(decimal(&bar["total_revenue"]), dec!(85.80));
    assert_eq!(decimal(&bar["average_order_value"]), dec!(85.80));

    let quiet = outlets
        .iter()
        .find(|o| o["outlet_name"] == "Quiet Cafe")
        .unwrap();
    assert_eq!(quiet["total_orders"], 0);
    assert_eq!(decimal(&quiet["total_revenue"]), Decimal::ZERO);
    assert_eq!(decimal(&quiet["average_order_value"]), Decimal::ZERO);
}

#[tokio::test]
async fn guest_spending_ranks_checked_in_guests() {
    let app = TestApp::new().await;

    // Room + guest + checked-in reservation
    let room_type = expect_data(
        app.request(
            Method::POST,
            "/api/v1/room-types",
            Some(json!({
                "name": "Suite",
                "base_price": "200.00",
                "max_occupancy": 3
            })),
            Some(&app.admin_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let room = expect_data(
        app.request(
            Method::POST,
            "/api/v1/rooms",
            Some(json!({
                "room_number": "701",
                "room_type_id": room_type["id"].as_str().unwrap(),
                "floor_number": 7
            })),
            Some(&app.admin_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let guest = expect_data(
        app.request(
            Method::POST,
            "/api/v1/guests",
            Some(json!({
                "first_name": "Big",
                "last_name": "Spender",
                "phone": "05550009999"
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let today = Utc::now().date_naive();
    let reservation = expect_data(
        app.request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest["id"].as_str().unwrap(),
                "room_id": room["id"].as_str().unwrap(),
                "checkin_date": today,
                "checkout_date": today + Duration::days(2)
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let reservation_id = reservation["id"].as_str().unwrap().to_string();
    app.request(
        Method::POST,
        &format!("/api/v1/reservations/{}/check-in", reservation_id),
        Some(json!({})),
        Some(&app.receptionist_token),
    )
    .await;

    // Payments tied to the stay
    for (amount, payment_type) in [("400.00", "room_charge"), ("55.00", "fnb_charge")] {
        let response = app
            .request(
                Method::POST,
                "/api/v1/payments",
                Some(json!({
                    "amount": amount,
                    "payment_method": "card",
                    "payment_type": payment_type,
                    "reservation_id": reservation_id
                })),
                Some(&app.cashier_token),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // An unattached payment is not attributed to anyone
    record_payment(&app, "77.00", "fnb_charge").await;

    let snapshot = get(&app, "/api/v1/analytics/guest-spending").await;
    let guests = snapshot["guests"].as_array().unwrap();
    assert_eq!(guests.len(), 1);
    assert_eq!(guests[0]["guest_name"], "Big Spender");
    assert_eq!(guests[0]["room_number"], "701");
    assert_eq!(decimal(&guests[0]["total_spending"]), dec!(455.00));
    assert_eq!(decimal(&guests[0]["room_charges"]), dec!(400.00));
    assert_eq!(decimal(&guests[0]["fnb_charges"]), dec!(55.00));
}

#[tokio::test]
async fn dashboard_composes_all_kpis_over_one_day() {
    let app = TestApp::new().await;
    seed_rooms(&app).await;
    record_payment(&app, "100.00", "room_charge").await;
    record_payment(&app, "50.00", "fnb_charge").await;

    let kpis = get(&app, "/api/v1/analytics/dashboard-kpis").await;

    let date = kpis["revenue_today"]["date"].as_str().unwrap();
    for section in [
        "occupancy_rate",
        "top_items",
        "guest_spending",
        "revenue_split",
        "arpr",
    ] {
        assert_eq!(kpis[section]["date"].as_str().unwrap(), date);
    }

    assert_eq!(decimal(&kpis["revenue_today"]["total_revenue"]), dec!(150.00));
    assert_eq!(kpis["occupancy_rate"]["occupancy_rate"], 50.0);
    assert_eq!(decimal(&kpis["arpr"]["arpr"]), dec!(25.00));
}

#[tokio::test]
async fn payment_method_breakdown_groups_by_method() {
    let app = TestApp::new().await;
    record_payment(&app, "60.00", "fnb_charge").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/payments",
            Some(json!({
                "amount": "40.00",
                "payment_method": "cash",
                "payment_type": "fnb_charge"
            })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let snapshot = get(&app, "/api/v1/analytics/payment-methods").await;
    assert_eq!(decimal(&snapshot["total_amount"]), dec!(100.00));
    let breakdown = snapshot["breakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0]["payment_method"], "card");
    assert_eq!(breakdown[0]["percentage"], 60.0);
    assert_eq!(breakdown[0]["transaction_count"], 1);
    assert_eq!(breakdown[1]["payment_method"], "cash");
    assert_eq!(breakdown[1]["percentage"], 40.0);
}

#[tokio::test]
async fn room_type_performance_reports_active_stays() {
    let app = TestApp::new().await;

    let room_type = expect_data(
        app.request(
            Method::POST,
            "/api/v1/room-types",
            Some(json!({
                "name": "Deluxe",
                "base_price": "150.00",
                "max_occupancy": 2
            })),
            Some(&app.admin_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let room_type_id = room_type["id"].as_str().unwrap().to_string();

    let room = expect_data(
        app.request(
            Method::POST,
            "/api/v1/rooms",
            Some(json!({
                "room_number": "801",
                "room_type_id": room_type_id,
                "floor_number": 8
            })),
            Some(&app.admin_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let guest = expect_data(
        app.request(
            Method::POST,
            "/api/v1/guests",
            Some(json!({
                "first_name": "Type",
                "last_name": "Tester",
                "phone": "05550005555"
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let today = Utc::now().date_naive();
    let reservation = expect_data(
        app.request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest["id"].as_str().unwrap(),
                "room_id": room["id"].as_str().unwrap(),
                "checkin_date": today,
                "checkout_date": today + Duration::days(2)
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    app.request(
        Method::POST,
        &format!(
            "/api/v1/reservations/{}/check-in",
            reservation["id"].as_str().unwrap()
        ),
        Some(json!({})),
        Some(&app.receptionist_token),
    )
    .await;

    let snapshot = get(&app, "/api/v1/analytics/room-type-performance").await;
    let types = snapshot["room_types"].as_array().unwrap();
    let deluxe = types
        .iter()
        .find(|t| t["room_type_name"] == "Deluxe")
        .unwrap();
    assert_eq!(deluxe["total_bookings"], 1);
    assert_eq!(decimal(&deluxe["total_revenue"]), dec!(300.00));
    // The one room of this type is occupied after check-in
    assert_eq!(deluxe["occupancy_rate"], 100.0);
}
