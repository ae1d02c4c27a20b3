//! Shared integration test harness: an in-memory SQLite database with
//! migrations applied, seeded staff accounts, and helpers for driving
//! the router without a network socket.
#![allow(dead_code)]

use axum::{
    body::{self, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

use innkeeper_api::{
    app_router,
    config::AppConfig,
    entities::user::UserRole,
    migrator::Migrator,
    services::users::RegisterUser,
    AppState,
};
use sea_orm_migration::MigratorTrait;

pub struct TestApp {
    pub state: AppState,
    router: Router,
    pub admin_token: String,
    pub receptionist_token: String,
    pub cashier_token: String,
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        jwt_secret: "integration_test_signing_secret_with_length".into(),
        access_token_expire_minutes: 30,
        host: "127.0.0.1".into(),
        port: 0,
        environment: "development".into(),
        log_level: "warn".into(),
        log_json: false,
        auto_migrate: true,
        cors_allowed_origins: None,
        debug: false,
        db_max_connections: 1,
        db_min_connections: 1,
        db_connect_timeout_secs: 5,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        // A single connection keeps every query on the same in-memory
        // database.
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.expect("sqlite connection");
        Migrator::up(&db, None).await.expect("migrations");

        let state = AppState::new(Arc::new(db), test_config());

        for (username, role) in [
            ("admin", UserRole::Admin),
            ("frontdesk", UserRole::Receptionist),
            ("barkeep", UserRole::Cashier),
        ] {
            state
                .services
                .users
                .register(
                    RegisterUser {
                        username: username.to_string(),
                        email: format!("{}@example.com", username),
                        password: "changeme1".to_string(),
                        full_name: username.to_string(),
                        role,
                        is_active: true,
                    },
                    None,
                )
                .await
                .expect("seed user");
        }

        let admin_token = state.auth.generate_token("admin").expect("token").0;
        let receptionist_token = state.auth.generate_token("frontdesk").expect("token").0;
        let cashier_token = state.auth.generate_token("barkeep").expect("token").0;

        let router = app_router().with_state(state.clone());

        Self {
            state,
            router,
            admin_token,
            receptionist_token,
            cashier_token,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        self.router.clone().oneshot(request).await.expect("response")
    }

    /// Form-encoded login request; returns the raw response.
    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "username={}&password={}",
                username, password
            )))
            .expect("request");

        self.router.clone().oneshot(request).await.expect("response")
    }
}

pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

/// Unwraps the `data` field of the standard response envelope, asserting
/// the expected status first.
pub async fn expect_data(response: Response<Body>, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    let mut body = response_json(response).await;
    assert_eq!(body["success"], Value::Bool(true));
    body["data"].take()
}
