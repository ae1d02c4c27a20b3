use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{require_roles, CurrentUser, CASHIER_ROLES},
    entities::{
        audit_log::AuditAction,
        item, item_category,
        outlet::{self, OutletType},
    },
    errors::ServiceError,
    handlers::common::{created_response, validate_input},
    services::audit,
    ApiResponse, ApiResult, AppState,
};

/// Build the outlets Router scoped under `/api/v1/outlets`.
pub fn outlet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_outlets).post(create_outlet))
        .route("/:id", get(get_outlet).put(update_outlet))
}

/// Build the item-category Router scoped under `/api/v1/item-categories`.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", get(get_category).put(update_category))
}

/// Build the items Router scoped under `/api/v1/items`.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).put(update_item))
        .route("/:id/availability", put(set_item_availability))
}

// Outlet DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOutletRequest {
    pub name: String,
    pub outlet_type: OutletType,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Opening/closing times keyed by weekday
    pub operating_hours: Option<Value>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOutletRequest {
    pub name: Option<String>,
    pub outlet_type: Option<OutletType>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub operating_hours: Option<Value>,
    pub is_active: Option<bool>,
}

// Category DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub outlet_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub outlet_id: Option<Uuid>,
}

// Item DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub outlet_id: Uuid,
    /// Menu price, must be positive
    pub price: Decimal,
    pub cost: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub preparation_time: Option<i32>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub dietary_info: Vec<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub preparation_time: Option<i32>,
    pub allergens: Option<Vec<String>>,
    pub dietary_info: Option<Vec<String>>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemAvailabilityUpdate {
    pub is_available: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemListQuery {
    pub outlet_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub available_only: Option<bool>,
}

fn default_true() -> bool {
    true
}

// Outlet handlers

#[utoipa::path(
    post,
    path = "/api/v1/outlets",
    request_body = CreateOutletRequest,
    responses(
        (status = 201, description = "Outlet created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn create_outlet(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateOutletRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, CASHIER_ROLES)?;
    validate_input(&payload)?;

    let txn = state.db.begin().await?;

    let now = Utc::now();
    let id = Uuid::new_v4();
    let model = outlet::ActiveModel {
        id: Set(id),
        name: Set(payload.name),
        outlet_type: Set(payload.outlet_type),
        location: Set(payload.location),
        description: Set(payload.description),
        operating_hours: Set(payload.operating_hours),
        is_active: Set(payload.is_active),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        "outlets",
        id,
        AuditAction::Insert,
        None,
        Some(json!({ "name": model.name })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;

    info!(outlet_id = %id, "outlet created");
    Ok(created_response(model))
}

#[utoipa::path(
    get,
    path = "/api/v1/outlets",
    responses((status = 200, description = "Outlets returned")),
    tag = "fnb"
)]
pub async fn list_outlets(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<Vec<outlet::Model>> {
    let outlets = outlet::Entity::find()
        .order_by_asc(outlet::Column::Name)
        .all(&*state.db)
        .await?;
    Ok(Json(ApiResponse::success(outlets)))
}

#[utoipa::path(
    get,
    path = "/api/v1/outlets/{id}",
    params(("id" = Uuid, Path, description = "Outlet id")),
    responses(
        (status = 200, description = "Outlet returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn get_outlet(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<outlet::Model> {
    let outlet = outlet::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Outlet {} not found", id)))?;
    Ok(Json(ApiResponse::success(outlet)))
}

#[utoipa::path(
    put,
    path = "/api/v1/outlets/{id}",
    params(("id" = Uuid, Path, description = "Outlet id")),
    request_body = UpdateOutletRequest,
    responses(
        (status = 200, description = "Outlet updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn update_outlet(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOutletRequest>,
) -> ApiResult<outlet::Model> {
    require_roles(&current, CASHIER_ROLES)?;

    let txn = state.db.begin().await?;

    let existing = outlet::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Outlet {} not found", id)))?;

    let old = json!({ "name": existing.name, "is_active": existing.is_active });

    let mut active: outlet::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(outlet_type) = payload.outlet_type {
        active.outlet_type = Set(outlet_type);
    }
    if let Some(location) = payload.location {
        active.location = Set(Some(location));
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(operating_hours) = payload.operating_hours {
        active.operating_hours = Set(Some(operating_hours));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "outlets",
        id,
        AuditAction::Update,
        Some(old),
        Some(json!({ "name": updated.name, "is_active": updated.is_active })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;
    Ok(Json(ApiResponse::success(updated)))
}

// Category handlers

#[utoipa::path(
    post,
    path = "/api/v1/item-categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created"),
        (status = 404, description = "Outlet not found", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn create_category(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, CASHIER_ROLES)?;
    validate_input(&payload)?;

    let txn = state.db.begin().await?;

    if let Some(outlet_id) = payload.outlet_id {
        outlet::Entity::find_by_id(outlet_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Outlet {} not found", outlet_id)))?;
    }

    let now = Utc::now();
    let id = Uuid::new_v4();
    let model = item_category::ActiveModel {
        id: Set(id),
        name: Set(payload.name),
        description: Set(payload.description),
        outlet_id: Set(payload.outlet_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        "item_categories",
        id,
        AuditAction::Insert,
        None,
        Some(json!({ "name": model.name })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;
    Ok(created_response(model))
}

#[utoipa::path(
    get,
    path = "/api/v1/item-categories",
    responses((status = 200, description = "Categories returned")),
    tag = "fnb"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<Vec<item_category::Model>> {
    let categories = item_category::Entity::find()
        .order_by_asc(item_category::Column::Name)
        .all(&*state.db)
        .await?;
    Ok(Json(ApiResponse::success(categories)))
}

#[utoipa::path(
    get,
    path = "/api/v1/item-categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn get_category(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<item_category::Model> {
    let category = item_category::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;
    Ok(Json(ApiResponse::success(category)))
}

#[utoipa::path(
    put,
    path = "/api/v1/item-categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn update_category(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> ApiResult<item_category::Model> {
    require_roles(&current, CASHIER_ROLES)?;

    let txn = state.db.begin().await?;

    let existing = item_category::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;

    let old = json!({ "name": existing.name });

    let mut active: item_category::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(outlet_id) = payload.outlet_id {
        outlet::Entity::find_by_id(outlet_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Outlet {} not found", outlet_id)))?;
        active.outlet_id = Set(Some(outlet_id));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "item_categories",
        id,
        AuditAction::Update,
        Some(old),
        Some(json!({ "name": updated.name })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;
    Ok(Json(ApiResponse::success(updated)))
}

// Item handlers

#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn create_item(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, CASHIER_ROLES)?;
    validate_input(&payload)?;

    if payload.price <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Price must be greater than 0".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    outlet::Entity::find_by_id(payload.outlet_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Outlet {} not found", payload.outlet_id))
        })?;

    if let Some(category_id) = payload.category_id {
        item_category::Entity::find_by_id(category_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Category {} not found", category_id))
            })?;
    }

    let now = Utc::now();
    let id = Uuid::new_v4();
    let model = item::ActiveModel {
        id: Set(id),
        name: Set(payload.name),
        description: Set(payload.description),
        category_id: Set(payload.category_id),
        outlet_id: Set(payload.outlet_id),
        price: Set(payload.price),
        cost: Set(payload.cost),
        is_available: Set(payload.is_available),
        preparation_time: Set(payload.preparation_time),
        allergens: Set(json!(payload.allergens)),
        dietary_info: Set(json!(payload.dietary_info)),
        image_url: Set(payload.image_url),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        "items",
        id,
        AuditAction::Insert,
        None,
        Some(json!({ "name": model.name, "price": model.price })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;

    info!(item_id = %id, "menu item created");
    Ok(created_response(model))
}

#[utoipa::path(
    get,
    path = "/api/v1/items",
    params(ItemListQuery),
    responses((status = 200, description = "Items returned")),
    tag = "fnb"
)]
pub async fn list_items(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Query(params): Query<ItemListQuery>,
) -> ApiResult<Vec<item::Model>> {
    let mut query = item::Entity::find();
    if let Some(outlet_id) = params.outlet_id {
        query = query.filter(item::Column::OutletId.eq(outlet_id));
    }
    if let Some(category_id) = params.category_id {
        query = query.filter(item::Column::CategoryId.eq(category_id));
    }
    if params.available_only.unwrap_or(false) {
        query = query.filter(item::Column::IsAvailable.eq(true));
    }

    let items = query
        .order_by_asc(item::Column::Name)
        .all(&*state.db)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn get_item(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<item::Model> {
    let item = item::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;
    Ok(Json(ApiResponse::success(item)))
}

#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn update_item(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> ApiResult<item::Model> {
    require_roles(&current, CASHIER_ROLES)?;

    if matches!(payload.price, Some(p) if p <= Decimal::ZERO) {
        return Err(ServiceError::ValidationError(
            "Price must be greater than 0".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    let existing = item::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;

    let old = json!({ "name": existing.name, "price": existing.price });

    let mut active: item::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(Some(category_id));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(cost) = payload.cost {
        active.cost = Set(Some(cost));
    }
    if let Some(preparation_time) = payload.preparation_time {
        active.preparation_time = Set(Some(preparation_time));
    }
    if let Some(allergens) = payload.allergens {
        active.allergens = Set(json!(allergens));
    }
    if let Some(dietary_info) = payload.dietary_info {
        active.dietary_info = Set(json!(dietary_info));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "items",
        id,
        AuditAction::Update,
        Some(old),
        Some(json!({ "name": updated.name, "price": updated.price })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// Toggle an item on or off the menu without editing it.
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}/availability",
    params(("id" = Uuid, Path, description = "Item id")),
    request_body = ItemAvailabilityUpdate,
    responses(
        (status = 200, description = "Availability updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "fnb"
)]
pub async fn set_item_availability(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ItemAvailabilityUpdate>,
) -> ApiResult<item::Model> {
    require_roles(&current, CASHIER_ROLES)?;

    let txn = state.db.begin().await?;

    let existing = item::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;

    let old_available = existing.is_available;
    let mut active: item::ActiveModel = existing.into();
    active.is_available = Set(payload.is_available);
    active.updated_at = Set(Utc::now());
    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "items",
        id,
        AuditAction::Update,
        Some(json!({ "is_available": old_available })),
        Some(json!({ "is_available": updated.is_available })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;
    Ok(Json(ApiResponse::success(updated)))
}
