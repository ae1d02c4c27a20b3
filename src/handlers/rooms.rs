use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, put},
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
    auth::{require_roles, CurrentUser, RECEPTION_ROLES},
    entities::{
        audit_log::AuditAction,
        room::{self, RoomStatus},
        room_type,
    },
    errors::ServiceError,
    handlers::common::{created_response, validate_input},
    services::audit,
    ApiResponse, ApiResult, AppState,
};

/// Build the room-type Router scoped under `/api/v1/room-types`.
pub fn room_type_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_room_types).post(create_room_type))
        .route("/:id", get(get_room_type).put(update_room_type))
}

/// Build the rooms Router scoped under `/api/v1/rooms`.
pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/available", get(available_rooms))
        .route("/:id", get(get_room).put(update_room))
        .route("/:id/status", put(set_room_status))
}

// Room type DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomTypeRequest {
    pub name: String,
    pub description: Option<String>,
    /// Nightly base rate, must be positive
    pub base_price: Decimal,
    pub max_occupancy: i32,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub max_occupancy: Option<i32>,
    pub amenities: Option<Vec<String>>,
}

// Room DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    pub room_number: String,
    pub room_type_id: Uuid,
    pub floor_number: i32,
    #[serde(default)]
    pub status: Option<RoomStatus>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomRequest {
    pub room_number: Option<String>,
    pub room_type_id: Option<Uuid>,
    pub floor_number: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoomStatusUpdate {
    pub status: RoomStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RoomListQuery {
    pub status: Option<RoomStatus>,
    pub room_type_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub room_type_id: Option<Uuid>,
}

// Room type handlers

#[utoipa::path(
    post,
    path = "/api/v1/room-types",
    request_body = CreateRoomTypeRequest,
    responses(
        (status = 201, description = "Room type created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn create_room_type(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateRoomTypeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, RECEPTION_ROLES)?;
    validate_input(&payload)?;

    if payload.base_price <= Decimal::ZERO {
        return Err(ServiceError::ValidationError(
            "Base price must be greater than 0".to_string(),
        ));
    }
    if payload.max_occupancy <= 0 {
        return Err(ServiceError::ValidationError(
            "Max occupancy must be greater than 0".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    let now = Utc::now();
    let id = Uuid::new_v4();
    let model = room_type::ActiveModel {
        id: Set(id),
        name: Set(payload.name),
        description: Set(payload.description),
        base_price: Set(payload.base_price),
        max_occupancy: Set(payload.max_occupancy),
        amenities: Set(json!(payload.amenities)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        "room_types",
        id,
        AuditAction::Insert,
        None,
        Some(json!({ "name": model.name, "base_price": model.base_price })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;

    info!(room_type_id = %id, "room type created");
    Ok(created_response(model))
}

#[utoipa::path(
    get,
    path = "/api/v1/room-types",
    responses((status = 200, description = "Room types returned")),
    tag = "rooms"
)]
pub async fn list_room_types(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> ApiResult<Vec<room_type::Model>> {
    let types = room_type::Entity::find()
        .order_by_asc(room_type::Column::Name)
        .all(&*state.db)
        .await?;
    Ok(Json(ApiResponse::success(types)))
}

#[utoipa::path(
    get,
    path = "/api/v1/room-types/{id}",
    params(("id" = Uuid, Path, description = "Room type id")),
    responses(
        (status = 200, description = "Room type returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn get_room_type(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<room_type::Model> {
    let room_type = room_type::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Room type {} not found", id)))?;
    Ok(Json(ApiResponse::success(room_type)))
}

#[utoipa::path(
    put,
    path = "/api/v1/room-types/{id}",
    params(("id" = Uuid, Path, description = "Room type id")),
    request_body = UpdateRoomTypeRequest,
    responses(
        (status = 200, description = "Room type updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn update_room_type(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomTypeRequest>,
) -> ApiResult<room_type::Model> {
    require_roles(&current, RECEPTION_ROLES)?;

    if matches!(payload.base_price, Some(p) if p <= Decimal::ZERO) {
        return Err(ServiceError::ValidationError(
            "Base price must be greater than 0".to_string(),
        ));
    }
    if matches!(payload.max_occupancy, Some(o) if o <= 0) {
        return Err(ServiceError::ValidationError(
            "Max occupancy must be greater than 0".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    let existing = room_type::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Room type {} not found", id)))?;

    let old = json!({ "name": existing.name, "base_price": existing.base_price });

    let mut active: room_type::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(base_price) = payload.base_price {
        active.base_price = Set(base_price);
    }
    if let Some(max_occupancy) = payload.max_occupancy {
        active.max_occupancy = Set(max_occupancy);
    }
    if let Some(amenities) = payload.amenities {
        active.amenities = Set(json!(amenities));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "room_types",
        id,
        AuditAction::Update,
        Some(old),
        Some(json!({ "name": updated.name, "base_price": updated.base_price })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;
    Ok(Json(ApiResponse::success(updated)))
}

// Room handlers

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate room number", body = crate::errors::ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn create_room(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, RECEPTION_ROLES)?;
    validate_input(&payload)?;

    if payload.floor_number <= 0 {
        return Err(ServiceError::ValidationError(
            "Floor number must be greater than 0".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    room_type::Entity::find_by_id(payload.room_type_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Room type {} not found", payload.room_type_id))
        })?;

    let duplicate = room::Entity::find()
        .filter(room::Column::RoomNumber.eq(&payload.room_number))
        .one(&txn)
        .await?;
    if duplicate.is_some() {
        return Err(ServiceError::Conflict(format!(
            "Room number {} already exists",
            payload.room_number
        )));
    }

    let now = Utc::now();
    let id = Uuid::new_v4();
    let model = room::ActiveModel {
        id: Set(id),
        room_number: Set(payload.room_number),
        room_type_id: Set(payload.room_type_id),
        floor_number: Set(payload.floor_number),
        status: Set(payload.status.unwrap_or(RoomStatus::Available)),
        description: Set(payload.description),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        "rooms",
        id,
        AuditAction::Insert,
        None,
        Some(json!({ "room_number": model.room_number, "status": model.status })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;

    info!(room_id = %id, room_number = %model.room_number, "room created");
    Ok(created_response(model))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    params(RoomListQuery),
    responses((status = 200, description = "Rooms returned")),
    tag = "rooms"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Query(params): Query<RoomListQuery>,
) -> ApiResult<Vec<room::Model>> {
    let mut query = room::Entity::find();
    if let Some(status) = params.status {
        query = query.filter(room::Column::Status.eq(status));
    }
    if let Some(room_type_id) = params.room_type_id {
        query = query.filter(room::Column::RoomTypeId.eq(room_type_id));
    }

    let rooms = query
        .order_by_asc(room::Column::RoomNumber)
        .all(&*state.db)
        .await?;
    Ok(Json(ApiResponse::success(rooms)))
}

/// Rooms bookable for a date window.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/available",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Available rooms returned"),
        (status = 400, description = "Invalid date range", body = crate::errors::ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn available_rooms(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Query(params): Query<AvailabilityQuery>,
) -> ApiResult<Vec<room::Model>> {
    let rooms = state
        .services
        .reservations
        .available_rooms(
            params.checkin_date,
            params.checkout_date,
            params.room_type_id,
        )
        .await?;
    Ok(Json(ApiResponse::success(rooms)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<room::Model> {
    let room = room::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Room {} not found", id)))?;
    Ok(Json(ApiResponse::success(room)))
}

#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn update_room(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomRequest>,
) -> ApiResult<room::Model> {
    require_roles(&current, RECEPTION_ROLES)?;

    if matches!(payload.floor_number, Some(f) if f <= 0) {
        return Err(ServiceError::ValidationError(
            "Floor number must be greater than 0".to_string(),
        ));
    }

    let txn = state.db.begin().await?;

    let existing = room::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Room {} not found", id)))?;

    let old = json!({ "room_number": existing.room_number });

    let mut active: room::ActiveModel = existing.into();
    if let Some(room_number) = payload.room_number {
        active.room_number = Set(room_number);
    }
    if let Some(room_type_id) = payload.room_type_id {
        room_type::Entity::find_by_id(room_type_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Room type {} not found", room_type_id))
            })?;
        active.room_type_id = Set(room_type_id);
    }
    if let Some(floor_number) = payload.floor_number {
        active.floor_number = Set(floor_number);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "rooms",
        id,
        AuditAction::Update,
        Some(old),
        Some(json!({ "room_number": updated.room_number })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// Set a room's housekeeping status directly (maintenance, cleaning, ...).
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}/status",
    params(("id" = Uuid, Path, description = "Room id")),
    request_body = RoomStatusUpdate,
    responses(
        (status = 200, description = "Status updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "rooms"
)]
pub async fn set_room_status(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RoomStatusUpdate>,
) -> ApiResult<room::Model> {
    require_roles(&current, RECEPTION_ROLES)?;

    let txn = state.db.begin().await?;

    let existing = room::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Room {} not found", id)))?;

    let old_status = existing.status;
    let mut active: room::ActiveModel = existing.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now());
    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "rooms",
        id,
        AuditAction::Update,
        Some(json!({ "status": old_status })),
        Some(json!({ "status": updated.status })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;
    Ok(Json(ApiResponse::success(updated)))
}
