use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{require_roles, CurrentUser, CASHIER_ROLES},
    entities::{
        guest,
        order::{self, OrderPaymentMethod, OrderPaymentStatus, OrderStatus, OrderType},
        order_line, outlet,
    },
    errors::ServiceError,
    handlers::common::{created_response, validate_input},
    services::orders::{CreateOrder, NewOrderLine},
    ApiResponse, ApiResult, AppState,
};

/// Build the orders Router scoped under `/api/v1/orders`.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order))
        .route("/:id/summary", get(order_summary))
        .route("/:id/lines", get(get_order_lines).post(add_order_item))
        .route("/:id/lines/:item_id", axum::routing::delete(remove_order_item))
        .route("/:id/confirm", post(confirm_order))
        .route("/:id/prepare", post(prepare_order))
        .route("/:id/ready", post(ready_order))
        .route("/:id/serve", post(serve_order))
        .route("/:id/pay", post(pay_order))
        .route("/:id/cancel", post(cancel_order))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OrderLineRequest {
    pub item_id: Uuid,
    /// Must be positive
    pub quantity: i32,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    pub outlet_id: Uuid,
    pub guest_id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    pub table_number: Option<String>,
    #[serde(default = "default_order_type")]
    pub order_type: OrderType,
    pub notes: Option<String>,
    #[serde(default)]
    pub order_lines: Vec<OrderLineRequest>,
}

fn default_order_type() -> OrderType {
    OrderType::DineIn
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderPaymentRequest {
    pub payment_method: OrderPaymentMethod,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderListQuery {
    pub outlet_id: Option<Uuid>,
    pub status: Option<OrderStatus>,
}

/// Flat order overview for tickets and the POS display.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummary {
    pub order_number: String,
    pub outlet: String,
    /// Guest name, or "Walk-in" when no guest is attached
    pub guest: String,
    pub table_number: Option<String>,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub service_charge: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub payment_status: OrderPaymentStatus,
    pub items_count: usize,
}

fn to_new_line(line: OrderLineRequest) -> Result<NewOrderLine, ServiceError> {
    if line.quantity <= 0 {
        return Err(ServiceError::ValidationError(
            "Quantity must be greater than 0".to_string(),
        ));
    }
    Ok(NewOrderLine {
        item_id: line.item_id,
        quantity: line.quantity,
        special_instructions: line.special_instructions,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Outlet or item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, CASHIER_ROLES)?;
    validate_input(&payload)?;

    let order_lines = payload
        .order_lines
        .into_iter()
        .map(to_new_line)
        .collect::<Result<Vec<_>, _>>()?;

    let order = state
        .services
        .orders
        .create(
            CreateOrder {
                outlet_id: payload.outlet_id,
                guest_id: payload.guest_id,
                reservation_id: payload.reservation_id,
                table_number: payload.table_number,
                order_type: payload.order_type,
                notes: payload.notes,
                order_lines,
            },
            Some(current.id),
        )
        .await?;

    Ok(created_response(order))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(OrderListQuery),
    responses((status = 200, description = "Orders returned")),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Query(params): Query<OrderListQuery>,
) -> ApiResult<Vec<order::Model>> {
    let orders = state
        .services
        .orders
        .list(params.outlet_id, params.status)
        .await?;
    Ok(Json(ApiResponse::success(orders)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<order::Model> {
    let order = state.services.orders.get(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Flat order overview with outlet and guest names resolved.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/summary",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Summary returned", body = ApiResponse<OrderSummary>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn order_summary(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<OrderSummary> {
    let order = state.services.orders.get(id).await?;
    let lines = state.services.orders.lines(id).await?;

    let outlet_name = outlet::Entity::find_by_id(order.outlet_id)
        .one(&*state.db)
        .await?
        .map(|o| o.name)
        .unwrap_or_default();
    let guest_name = match order.guest_id {
        Some(guest_id) => guest::Entity::find_by_id(guest_id)
            .one(&*state.db)
            .await?
            .map(|g| g.full_name())
            .unwrap_or_else(|| "Walk-in".to_string()),
        None => "Walk-in".to_string(),
    };

    Ok(Json(ApiResponse::success(OrderSummary {
        order_number: order.order_number,
        outlet: outlet_name,
        guest: guest_name,
        table_number: order.table_number,
        order_type: order.order_type,
        status: order.status,
        subtotal: order.subtotal,
        tax_amount: order.tax_amount,
        service_charge: order.service_charge,
        discount_amount: order.discount_amount,
        total_amount: order.total_amount,
        payment_status: order.payment_status,
        items_count: lines.len(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/lines",
    params(("id" = Uuid, Path, description = "Order id")),
    responses((status = 200, description = "Order lines returned")),
    tag = "orders"
)]
pub async fn get_order_lines(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<order_line::Model>> {
    // 404 for unknown orders rather than an empty list
    state.services.orders.get(id).await?;
    let lines = state.services.orders.lines(id).await?;
    Ok(Json(ApiResponse::success(lines)))
}

/// Add an item to the order, merging with an existing line for the same
/// item.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/lines",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = OrderLineRequest,
    responses(
        (status = 200, description = "Order updated"),
        (status = 400, description = "Order is not modifiable", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn add_order_item(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderLineRequest>,
) -> ApiResult<order::Model> {
    require_roles(&current, CASHIER_ROLES)?;

    let order = state
        .services
        .orders
        .add_item(id, to_new_line(payload)?, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}/lines/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Order id"),
        ("item_id" = Uuid, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Order updated"),
        (status = 400, description = "Order is not modifiable", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not on order", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn remove_order_item(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<order::Model> {
    require_roles(&current, CASHIER_ROLES)?;

    let order = state
        .services
        .orders
        .remove_item(id, item_id, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Confirm a pending order.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/confirm",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order confirmed"),
        (status = 400, description = "Wrong prior state", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn confirm_order(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<order::Model> {
    require_roles(&current, CASHIER_ROLES)?;
    let order = state
        .services
        .orders
        .advance_status(id, OrderStatus::Confirmed, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Send a confirmed order to the kitchen.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/prepare",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order moved to preparing"),
        (status = 400, description = "Wrong prior state", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn prepare_order(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<order::Model> {
    require_roles(&current, CASHIER_ROLES)?;
    let order = state
        .services
        .orders
        .advance_status(id, OrderStatus::Preparing, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Mark a preparing order ready for pickup/serving.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/ready",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order marked ready"),
        (status = 400, description = "Wrong prior state", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn ready_order(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<order::Model> {
    require_roles(&current, CASHIER_ROLES)?;
    let order = state
        .services
        .orders
        .advance_status(id, OrderStatus::Ready, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Mark a ready order as served.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/serve",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order served"),
        (status = 400, description = "Wrong prior state", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn serve_order(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<order::Model> {
    require_roles(&current, CASHIER_ROLES)?;
    let order = state
        .services
        .orders
        .advance_status(id, OrderStatus::Served, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Settle the order; fails if it is already paid.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/pay",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = OrderPaymentRequest,
    responses(
        (status = 200, description = "Order paid"),
        (status = 400, description = "Already paid", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn pay_order(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderPaymentRequest>,
) -> ApiResult<order::Model> {
    require_roles(&current, CASHIER_ROLES)?;

    let order = state
        .services
        .orders
        .process_payment(id, payload.payment_method, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Cancel an order that has not been served or paid.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order cancelled"),
        (status = 400, description = "Served or paid orders cannot be cancelled", body = crate::errors::ErrorResponse)
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<order::Model> {
    require_roles(&current, CASHIER_ROLES)?;

    let order = state.services.orders.cancel(id, Some(current.id)).await?;
    Ok(Json(ApiResponse::success(order)))
}
