//! End-to-end reservation lifecycle: create guest → create reservation →
//! check in (room occupied) → check out (room cleaning), plus the guard
//! rails around cancellation and double transitions.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{expect_data, TestApp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

async fn seed_room(app: &TestApp, room_number: &str, nightly: Decimal) -> (String, String) {
    let room_type = expect_data(
        app.request(
            Method::POST,
            "/api/v1/room-types",
            Some(json!({
                "name": format!("Type {}", room_number),
                "base_price": nightly,
                "max_occupancy": 2,
                "amenities": ["wifi"]
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
                "room_number": room_number,
                "room_type_id": room_type_id,
                "floor_number": 1
            })),
            Some(&app.admin_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    (room["id"].as_str().unwrap().to_string(), room_type_id)
}

async fn seed_guest(app: &TestApp, name: &str) -> String {
    let guest = expect_data(
        app.request(
            Method::POST,
            "/api/v1/guests",
            Some(json!({
                "first_name": name,
                "last_name": "Tester",
                "phone": "05550001234"
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    guest["id"].as_str().unwrap().to_string()
}

async fn room_status(app: &TestApp, room_id: &str) -> String {
    let room = expect_data(
        app.request(
            Method::GET,
            &format!("/api/v1/rooms/{}", room_id),
            None,
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    room["status"].as_str().unwrap().to_string()
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn full_stay_flow_updates_room_status() {
    let app = TestApp::new().await;
    let (room_id, _) = seed_room(&app, "101", dec!(120.00)).await;
    let guest_id = seed_guest(&app, "Ada").await;

    let today = Utc::now().date_naive();
    let reservation = expect_data(
        app.request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": today,
                "checkout_date": today + Duration::days(2),
                "adults": 2
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let reservation_id = reservation["id"].as_str().unwrap().to_string();

    // Two nights at 120.00
    assert_eq!(decimal(&reservation["total_amount"]), dec!(240.00));
    assert_eq!(reservation["status"], "confirmed");

    let checked_in = expect_data(
        app.request(
            Method::POST,
            &format!("/api/v1/reservations/{}/check-in", reservation_id),
            Some(json!({})),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(checked_in["status"], "checked_in");
    assert!(checked_in["actual_checkin"].as_str().is_some());
    assert_eq!(room_status(&app, &room_id).await, "occupied");

    // Second check-in must fail: already checked in
    let double = app
        .request(
            Method::POST,
            &format!("/api/v1/reservations/{}/check-in", reservation_id),
            Some(json!({})),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(double.status(), StatusCode::BAD_REQUEST);

    let checked_out = expect_data(
        app.request(
            Method::POST,
            &format!("/api/v1/reservations/{}/check-out", reservation_id),
            Some(json!({})),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(checked_out["status"], "checked_out");
    assert_eq!(room_status(&app, &room_id).await, "cleaning");
}

#[tokio::test]
async fn checkin_rejected_before_arrival_date() {
    let app = TestApp::new().await;
    let (room_id, _) = seed_room(&app, "102", dec!(90.00)).await;
    let guest_id = seed_guest(&app, "Grace").await;

    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    let reservation = expect_data(
        app.request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": tomorrow,
                "checkout_date": tomorrow + Duration::days(1)
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let early = app
        .request(
            Method::POST,
            &format!(
                "/api/v1/reservations/{}/check-in",
                reservation["id"].as_str().unwrap()
            ),
            Some(json!({})),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(early.status(), StatusCode::BAD_REQUEST);
    assert_eq!(room_status(&app, &room_id).await, "available");
}

#[tokio::test]
async fn cancel_forbidden_after_checkin_and_frees_occupied_room_otherwise() {
    let app = TestApp::new().await;
    let (room_id, _) = seed_room(&app, "103", dec!(100.00)).await;
    let guest_id = seed_guest(&app, "Edsger").await;

    let today = Utc::now().date_naive();
    let reservation = expect_data(
        app.request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": today,
                "checkout_date": today + Duration::days(1)
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

    let cancel = app
        .request(
            Method::POST,
            &format!("/api/v1/reservations/{}/cancel", reservation_id),
            None,
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(cancel.status(), StatusCode::BAD_REQUEST);

    // A different confirmed reservation on an occupied room: cancelling
    // resets the room to available.
    let (room2_id, _) = seed_room(&app, "104", dec!(100.00)).await;
    let guest2_id = seed_guest(&app, "Barbara").await;
    let res2 = expect_data(
        app.request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest2_id,
                "room_id": room2_id,
                "checkin_date": today,
                "checkout_date": today + Duration::days(1)
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let res2_id = res2["id"].as_str().unwrap().to_string();

    // Mark the room occupied out-of-band, then cancel
    app.request(
        Method::PUT,
        &format!("/api/v1/rooms/{}/status", room2_id),
        Some(json!({ "status": "occupied" })),
        Some(&app.receptionist_token),
    )
    .await;

    let cancelled = expect_data(
        app.request(
            Method::POST,
            &format!("/api/v1/reservations/{}/cancel", res2_id),
            None,
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(room_status(&app, &room2_id).await, "available");
}

#[tokio::test]
async fn overlapping_reservation_is_rejected() {
    let app = TestApp::new().await;
    let (room_id, _) = seed_room(&app, "105", dec!(80.00)).await;
    let guest_id = seed_guest(&app, "Alan").await;

    let today = Utc::now().date_naive();
    app.request(
        Method::POST,
        "/api/v1/reservations",
        Some(json!({
            "guest_id": guest_id,
            "room_id": room_id,
            "checkin_date": today,
            "checkout_date": today + Duration::days(3)
        })),
        Some(&app.receptionist_token),
    )
    .await;

    let overlap = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": today + Duration::days(1),
                "checkout_date": today + Duration::days(2)
            })),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(overlap.status(), StatusCode::CONFLICT);

    // Adjacent stay (checkout day == next checkin) is allowed
    let adjacent = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": today + Duration::days(3),
                "checkout_date": today + Duration::days(4)
            })),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(adjacent.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn reservation_validation_rejects_bad_input() {
    let app = TestApp::new().await;
    let (room_id, _) = seed_room(&app, "106", dec!(80.00)).await;
    let guest_id = seed_guest(&app, "Tony").await;

    let today = Utc::now().date_naive();

    // checkout before checkin
    let inverted = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": today,
                "checkout_date": today - Duration::days(1)
            })),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);

    // zero adults
    let no_adults = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": today,
                "checkout_date": today + Duration::days(1),
                "adults": 0
            })),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(no_adults.status(), StatusCode::BAD_REQUEST);

    // short phone number on guest creation
    let short_phone = app
        .request(
            Method::POST,
            "/api/v1/guests",
            Some(json!({
                "first_name": "No",
                "last_name": "Phone",
                "phone": "12345"
            })),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(short_phone.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn availability_excludes_reserved_and_maintenance_rooms() {
    let app = TestApp::new().await;
    let (reserved_room, _) = seed_room(&app, "201", dec!(80.00)).await;
    let (maintenance_room, _) = seed_room(&app, "202", dec!(80.00)).await;
    seed_room(&app, "203", dec!(80.00)).await;
    let guest_id = seed_guest(&app, "Margaret").await;

    let today = Utc::now().date_naive();
    app.request(
        Method::POST,
        "/api/v1/reservations",
        Some(json!({
            "guest_id": guest_id,
            "room_id": reserved_room,
            "checkin_date": today,
            "checkout_date": today + Duration::days(2)
        })),
        Some(&app.receptionist_token),
    )
    .await;
    app.request(
        Method::PUT,
        &format!("/api/v1/rooms/{}/status", maintenance_room),
        Some(json!({ "status": "maintenance" })),
        Some(&app.receptionist_token),
    )
    .await;

    let available = expect_data(
        app.request(
            Method::GET,
            &format!(
                "/api/v1/rooms/available?checkin_date={}&checkout_date={}",
                today,
                today + Duration::days(1)
            ),
            None,
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    let numbers: Vec<&str> = available
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["room_number"].as_str().unwrap())
        .collect();
    assert!(numbers.contains(&"203"));
    assert!(!numbers.contains(&"201"));
    assert!(!numbers.contains(&"202"));
}

#[tokio::test]
async fn reception_routes_reject_cashiers() {
    let app = TestApp::new().await;
    let (room_id, _) = seed_room(&app, "301", dec!(80.00)).await;
    let guest_id = seed_guest(&app, "Rear").await;

    let today = Utc::now().date_naive();
    let response = app
        .request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": today,
                "checkout_date": today + Duration::days(1)
            })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn stay_summary_reports_nights_and_names() {
    let app = TestApp::new().await;
    let (room_id, _) = seed_room(&app, "401", dec!(150.00)).await;
    let guest_id = seed_guest(&app, "Donald").await;

    let today = Utc::now().date_naive();
    let reservation = expect_data(
        app.request(
            Method::POST,
            "/api/v1/reservations",
            Some(json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "checkin_date": today,
                "checkout_date": today + Duration::days(3)
            })),
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let summary = expect_data(
        app.request(
            Method::GET,
            &format!(
                "/api/v1/reservations/{}/summary",
                reservation["id"].as_str().unwrap()
            ),
            None,
            Some(&app.receptionist_token),
        )
        .await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(summary["nights"], 3);
    assert_eq!(summary["guest_name"], "Donald Tester");
    assert_eq!(summary["room_number"], "401");
    assert_eq!(decimal(&summary["total_amount"]), dec!(450.00));
}
