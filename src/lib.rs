//! Innkeeper API Library
//!
//! Back-office API for a single hotel property: staff authentication,
//! room and reservation lifecycle, F&B ordering, payments, and a
//! dashboard of revenue/occupancy analytics.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub auth: auth::AuthService,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let auth = auth::AuthService::new(auth::AuthConfig::new(
            config.jwt_secret.clone(),
            config.access_token_lifetime(),
        ));
        let services = handlers::AppServices::new(db.clone(), auth.clone());
        Self {
            db,
            config,
            auth,
            services,
        }
    }
}

/// Standard response envelope.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// All `/api/v1` routes.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(api_status))
        .nest("/auth", handlers::auth::auth_routes())
        .nest("/guests", handlers::guests::guest_routes())
        .nest("/room-types", handlers::rooms::room_type_routes())
        .nest("/rooms", handlers::rooms::room_routes())
        .nest("/outlets", handlers::fnb::outlet_routes())
        .nest("/item-categories", handlers::fnb::category_routes())
        .nest("/items", handlers::fnb::item_routes())
        .nest("/orders", handlers::orders::order_routes())
        .nest("/payments", handlers::payments::payment_routes())
        .nest("/reservations", handlers::reservations::reservation_routes())
        .nest("/analytics", handlers::analytics::analytics_routes())
}

/// Top-level router: versioned API plus the unauthenticated liveness
/// endpoint.
pub fn app_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1_routes())
}

async fn api_status() -> Json<ApiResponse<Value>> {
    let status = json!({
        "status": "ok",
        "service": "innkeeper-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    Json(ApiResponse::success(status))
}

/// Liveness plus a database ping; no auth required.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Json(json!({
        "status": db_status,
        "checks": { "database": db_status },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod response_tests {
    use super::*;

    #[test]
    fn success_envelope_carries_data() {
        let response = ApiResponse::success("ok");
        assert!(response.success);
        assert_eq!(response.data, Some("ok"));
        assert!(response.message.is_none());
    }

    #[test]
    fn error_envelope_carries_message() {
        let response = ApiResponse::<()>::error("oops".into());
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("oops"));
    }
}
