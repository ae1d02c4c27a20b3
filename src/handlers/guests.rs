use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
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
        guest::{self, IdType},
    },
    errors::ServiceError,
    handlers::common::{created_response, validate_input},
    services::audit,
    ApiResponse, ApiResult, AppState,
};

/// Build the guests Router scoped under `/api/v1/guests`.
pub fn guest_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_guests).post(create_guest))
        .route("/:id", get(get_guest).put(update_guest))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGuestRequest {
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 10, message = "Phone number must be at least 10 characters"))]
    pub phone: String,
    pub address: Option<String>,
    pub nationality: Option<String>,
    pub id_type: Option<IdType>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateGuestRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 10, message = "Phone number must be at least 10 characters"))]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub nationality: Option<String>,
    pub id_type: Option<IdType>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GuestListQuery {
    /// Case-insensitive match on name or phone
    pub search: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/guests",
    request_body = CreateGuestRequest,
    responses(
        (status = 201, description = "Guest created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "guests"
)]
pub async fn create_guest(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateGuestRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, RECEPTION_ROLES)?;
    validate_input(&payload)?;

    let txn = state.db.begin().await?;

    let now = Utc::now();
    let id = Uuid::new_v4();
    let model = guest::ActiveModel {
        id: Set(id),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        address: Set(payload.address),
        nationality: Set(payload.nationality),
        id_type: Set(payload.id_type),
        id_number: Set(payload.id_number),
        date_of_birth: Set(payload.date_of_birth),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    audit::record(
        &txn,
        "guests",
        id,
        AuditAction::Insert,
        None,
        Some(json!({ "name": model.full_name(), "phone": model.phone })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;

    info!(guest_id = %id, "guest created");
    Ok(created_response(model))
}

#[utoipa::path(
    get,
    path = "/api/v1/guests",
    params(GuestListQuery),
    responses((status = 200, description = "Guests returned")),
    tag = "guests"
)]
pub async fn list_guests(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Query(params): Query<GuestListQuery>,
) -> ApiResult<Vec<guest::Model>> {
    let mut query = guest::Entity::find();
    if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        query = query.filter(
            Condition::any()
                .add(guest::Column::FirstName.like(pattern.clone()))
                .add(guest::Column::LastName.like(pattern.clone()))
                .add(guest::Column::Phone.like(pattern)),
        );
    }

    let guests = query
        .order_by_asc(guest::Column::LastName)
        .order_by_asc(guest::Column::FirstName)
        .all(&*state.db)
        .await?;

    Ok(Json(ApiResponse::success(guests)))
}

#[utoipa::path(
    get,
    path = "/api/v1/guests/{id}",
    params(("id" = Uuid, Path, description = "Guest id")),
    responses(
        (status = 200, description = "Guest returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "guests"
)]
pub async fn get_guest(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<guest::Model> {
    let guest = guest::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Guest {} not found", id)))?;

    Ok(Json(ApiResponse::success(guest)))
}

#[utoipa::path(
    put,
    path = "/api/v1/guests/{id}",
    params(("id" = Uuid, Path, description = "Guest id")),
    request_body = UpdateGuestRequest,
    responses(
        (status = 200, description = "Guest updated"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "guests"
)]
pub async fn update_guest(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGuestRequest>,
) -> ApiResult<guest::Model> {
    require_roles(&current, RECEPTION_ROLES)?;
    validate_input(&payload)?;

    let txn = state.db.begin().await?;

    let existing = guest::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Guest {} not found", id)))?;

    let old = json!({ "name": existing.full_name(), "phone": existing.phone });

    let mut active: guest::ActiveModel = existing.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(nationality) = payload.nationality {
        active.nationality = Set(Some(nationality));
    }
    if let Some(id_type) = payload.id_type {
        active.id_type = Set(Some(id_type));
    }
    if let Some(id_number) = payload.id_number {
        active.id_number = Set(Some(id_number));
    }
    if let Some(date_of_birth) = payload.date_of_birth {
        active.date_of_birth = Set(Some(date_of_birth));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&txn).await?;

    audit::record(
        &txn,
        "guests",
        id,
        AuditAction::Update,
        Some(old),
        Some(json!({ "name": updated.full_name(), "phone": updated.phone })),
        Some(current.id),
    )
    .await?;

    txn.commit().await?;

    Ok(Json(ApiResponse::success(updated)))
}
