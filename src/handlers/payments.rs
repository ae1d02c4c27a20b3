use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{require_roles, CurrentUser, CASHIER_ROLES},
    entities::{
        audit_log::AuditAction,
        order,
        payment::{self, PaymentMethod, PaymentStatus, PaymentType},
        reservation,
    },
    errors::ServiceError,
    handlers::common::{created_response, validate_input},
    services::audit,
    ApiResponse, ApiResult, AppState,
};

/// Build the payments Router scoped under `/api/v1/payments`.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/:id", get(get_payment))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordPaymentRequest {
    pub order_id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    /// Must be positive
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,
    pub transaction_id: Option<String>,
    /// Defaults to completed when omitted
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaymentListQuery {
    pub payment_type: Option<PaymentType>,
    pub status: Option<PaymentStatus>,
    /// Restrict to one calendar day
    pub date: Option<NaiveDate>,
}

/// Record a financial transaction against an order or a reservation.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment recorded"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Referenced order or reservation missing", body = crate::errors::ErrorResponse)
    ),
    tag = "payments"
)]
pub async fn record_payment(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, CASHIER_ROLES)?;
    validate_input(&payload)?;

    if payload.amount <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Amount must be greater than 0".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    if let Some(order_id) = payload.order_id {
        order::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;
    }
    if let Some(reservation_id) = payload.reservation_id {
        reservation::Entity::find_by_id(reservation_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Reservation {} not found", reservation_id))
            })?;
    }

    let now = Utc::now();
    let id = Uuid::new_v4();
    let model = payment::ActiveModel {
        id: Set(id),
        order_id: Set(payload.order_id),
        reservation_id: Set(payload.reservation_id),
        amount: Set(payload.amount),
        payment_method: Set(payload.payment_method),
        payment_type: Set(payload.payment_type),
        transaction_id: Set(payload.transaction_id),
        status: Set(payload.status.unwrap_or(PaymentStatus::Completed)),
        processed_by: Set(Some(current.id)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        "payments",
        id,
        AuditAction::Insert,
        None,
        Some(json!({ "amount": model.amount, "payment_type": model.payment_type })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;

    info!(payment_id = %id, "payment recorded");
    Ok(created_response(model))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    params(PaymentListQuery),
    responses((status = 200, description = "Payments returned")),
    tag = "payments"
)]
pub async fn list_payments(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Query(params): Query<PaymentListQuery>,
) -> ApiResult<Vec<payment::Model>> {
    let mut query = payment::Entity::find();
    if let Some(payment_type) = params.payment_type {
        query = query.filter(payment::Column::PaymentType.eq(payment_type));
    }
    if let Some(status) = params.status {
        query = query.filter(payment::Column::Status.eq(status));
    }
    if let Some(date) = params.date {
        let start = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let end = start + chrono::Duration::days(1);
        query = query
            .filter(payment::Column::CreatedAt.gte(start))
            .filter(payment::Column::CreatedAt.lt(end));
    }

    let payments = query
        .order_by_desc(payment::Column::CreatedAt)
        .all(&*state.db)
        .await?;
    Ok(Json(ApiResponse::success(payments)))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "payments"
)]
pub async fn get_payment(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<payment::Model> {
    let payment = payment::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Payment {} not found", id)))?;
    Ok(Json(ApiResponse::success(payment)))
}
