//! Authentication and authorization flows: uniform login failures,
//! inactive accounts, role-gated registration, password changes.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{expect_data, response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn login_returns_token_and_user() {
    let app = TestApp::new().await;

    let response = app.login("admin", "changeme1").await;
    let data = expect_data(response, StatusCode::OK).await;

    assert!(data["access_token"].as_str().is_some());
    assert_eq!(data["token_type"], "bearer");
    assert_eq!(data["expires_in"], 1800);
    assert_eq!(data["user"]["username"], "admin");
    assert!(data["user"]["password_hash"].is_null());
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new().await;

    let unknown = app.login("nobody", "changeme1").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = response_json(unknown).await;

    let wrong_password = app.login("admin", "not-the-password").await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = response_json(wrong_password).await;

    // Identical message for both causes; no user-existence leakage
    assert_eq!(unknown_body["message"], wrong_body["message"]);
}

#[tokio::test]
async fn unauthorized_requests_get_bearer_challenge() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/v1/analytics/revenue-today", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::GET,
            "/api/v1/auth/me",
            None,
            Some("not-a-real-token"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_requires_admin_role() {
    let app = TestApp::new().await;

    let payload = json!({
        "username": "newbie",
        "email": "newbie@example.com",
        "password": "changeme1",
        "full_name": "New Hire",
        "role": "cashier"
    });

    let forbidden = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            Some(payload.clone()),
            Some(&app.receptionist_token),
        )
        .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let created = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            Some(payload),
            Some(&app.admin_token),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn register_rejects_duplicates_and_short_fields() {
    let app = TestApp::new().await;

    let duplicate = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            Some(json!({
                "username": "admin",
                "email": "other@example.com",
                "password": "changeme1",
                "full_name": "Duplicate",
                "role": "cashier"
            })),
            Some(&app.admin_token),
        )
        .await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

    let short_username = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            Some(json!({
                "username": "ab",
                "email": "ab@example.com",
                "password": "changeme1",
                "full_name": "Too Short",
                "role": "cashier"
            })),
            Some(&app.admin_token),
        )
        .await;
    assert_eq!(short_username.status(), StatusCode::BAD_REQUEST);

    let short_password = app
        .request(
            Method::POST,
            "/api/v1/auth/register",
            Some(json!({
                "username": "valid",
                "email": "valid@example.com",
                "password": "short",
                "full_name": "Short Password",
                "role": "cashier"
            })),
            Some(&app.admin_token),
        )
        .await;
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inactive_account_is_rejected_at_login_and_token_check() {
    let app = TestApp::new().await;

    app.request(
        Method::POST,
        "/api/v1/auth/register",
        Some(json!({
            "username": "dormant",
            "email": "dormant@example.com",
            "password": "changeme1",
            "full_name": "Dormant",
            "role": "cashier",
            "is_active": false
        })),
        Some(&app.admin_token),
    )
    .await;

    let login = app.login("dormant", "changeme1").await;
    assert_eq!(login.status(), StatusCode::BAD_REQUEST);

    // A token for the inactive account fails verification with the same
    // 400, not a credentials error.
    let token = app.state.auth.generate_token("dormant").unwrap().0;
    let me = app
        .request(Method::GET, "/api/v1/auth/me", None, Some(&token))
        .await;
    assert_eq!(me.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn change_password_verifies_current_password() {
    let app = TestApp::new().await;

    let wrong = app
        .request(
            Method::POST,
            "/api/v1/auth/change-password",
            Some(json!({
                "current_password": "not-right",
                "new_password": "brandnew1"
            })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);

    let changed = app
        .request(
            Method::POST,
            "/api/v1/auth/change-password",
            Some(json!({
                "current_password": "changeme1",
                "new_password": "brandnew1"
            })),
            Some(&app.cashier_token),
        )
        .await;
    assert_eq!(changed.status(), StatusCode::OK);

    let old_login = app.login("barkeep", "changeme1").await;
    assert_eq!(old_login.status(), StatusCode::UNAUTHORIZED);

    let new_login = app.login("barkeep", "brandnew1").await;
    assert_eq!(new_login.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_issues_a_fresh_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/auth/refresh",
            None,
            Some(&app.admin_token),
        )
        .await;
    let data = expect_data(response, StatusCode::OK).await;

    let token = data["access_token"].as_str().unwrap().to_string();
    let me = app
        .request(Method::GET, "/api/v1/auth/me", None, Some(&token))
        .await;
    assert_eq!(me.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_needs_no_auth() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
}
