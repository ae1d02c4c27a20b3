use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{require_roles, CurrentUser, RECEPTION_ROLES},
    entities::{
        guest, reservation,
        reservation::ReservationStatus,
        room,
    },
    errors::ServiceError,
    handlers::common::{created_response, validate_input},
    services::reservations::{CreateReservation, UpdateReservation},
    ApiResponse, ApiResult, AppState,
};

/// Build the reservations Router scoped under `/api/v1/reservations`.
pub fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route("/:id", get(get_reservation).put(update_reservation))
        .route("/:id/summary", get(stay_summary))
        .route("/:id/check-in", post(check_in))
        .route("/:id/check-out", post(check_out))
        .route("/:id/cancel", post(cancel_reservation))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    #[serde(default = "default_adults")]
    pub adults: i32,
    #[serde(default)]
    pub children: i32,
    pub special_requests: Option<String>,
}

fn default_adults() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReservationRequest {
    pub checkin_date: Option<NaiveDate>,
    pub checkout_date: Option<NaiveDate>,
    pub adults: Option<i32>,
    pub children: Option<i32>,
    /// Manual override of the stored total (discounts, comps)
    pub total_amount: Option<Decimal>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckinRequest {
    pub checkin_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub checkout_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReservationListQuery {
    pub status: Option<ReservationStatus>,
    pub guest_id: Option<Uuid>,
}

/// Flat stay overview for the front desk.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaySummary {
    pub reservation_id: Uuid,
    pub guest_name: String,
    pub room_number: String,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub nights: i64,
    pub adults: i32,
    pub children: i32,
    pub total_amount: Decimal,
    pub status: ReservationStatus,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Room already reserved", body = crate::errors::ErrorResponse)
    ),
    tag = "reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    require_roles(&current, RECEPTION_ROLES)?;
    validate_input(&payload)?;

    if payload.adults <= 0 {
        return Err(ServiceError::ValidationError(
            "Number of adults must be greater than 0".to_string(),
        ));
    }
    if payload.children < 0 {
        return Err(ServiceError::ValidationError(
            "Number of children cannot be negative".to_string(),
        ));
    }

    let reservation = state
        .services
        .reservations
        .create(
            CreateReservation {
                guest_id: payload.guest_id,
                room_id: payload.room_id,
                checkin_date: payload.checkin_date,
                checkout_date: payload.checkout_date,
                adults: payload.adults,
                children: payload.children,
                special_requests: payload.special_requests,
            },
            Some(current.id),
        )
        .await?;

    Ok(created_response(reservation))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    params(ReservationListQuery),
    responses((status = 200, description = "Reservations returned")),
    tag = "reservations"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Query(params): Query<ReservationListQuery>,
) -> ApiResult<Vec<reservation::Model>> {
    let reservations = state
        .services
        .reservations
        .list(params.status, params.guest_id)
        .await?;
    Ok(Json(ApiResponse::success(reservations)))
}

/// Reservation detail with nested guest and room.
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation returned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "reservations"
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<serde_json::Value> {
    let reservation = state.services.reservations.get(id).await?;

    let guest = guest::Entity::find_by_id(reservation.guest_id)
        .one(&*state.db)
        .await?;
    let room = room::Entity::find_by_id(reservation.room_id)
        .one(&*state.db)
        .await?;

    let mut body = serde_json::to_value(&reservation)
        .map_err(|e| ServiceError::InternalError(e.to_string()))?;
    body["guest"] = serde_json::to_value(&guest)
        .map_err(|e| ServiceError::InternalError(e.to_string()))?;
    body["room"] = serde_json::to_value(&room)
        .map_err(|e| ServiceError::InternalError(e.to_string()))?;

    Ok(Json(ApiResponse::success(body)))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation id")),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "Reservation updated"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "reservations"
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReservationRequest>,
) -> ApiResult<reservation::Model> {
    require_roles(&current, RECEPTION_ROLES)?;
    validate_input(&payload)?;

    let reservation = state
        .services
        .reservations
        .update(
            id,
            UpdateReservation {
                checkin_date: payload.checkin_date,
                checkout_date: payload.checkout_date,
                adults: payload.adults,
                children: payload.children,
                total_amount: payload.total_amount,
                special_requests: payload.special_requests,
            },
            Some(current.id),
        )
        .await?;

    Ok(Json(ApiResponse::success(reservation)))
}

/// Flat stay overview (guest name, room number, nights, totals).
#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}/summary",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Summary returned", body = ApiResponse<StaySummary>),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "reservations"
)]
pub async fn stay_summary(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StaySummary> {
    let reservation = state.services.reservations.get(id).await?;

    let guest = guest::Entity::find_by_id(reservation.guest_id)
        .one(&*state.db)
        .await?;
    let room = room::Entity::find_by_id(reservation.room_id)
        .one(&*state.db)
        .await?;

    Ok(Json(ApiResponse::success(StaySummary {
        reservation_id: reservation.id,
        guest_name: guest.map(|g| g.full_name()).unwrap_or_default(),
        room_number: room.map(|r| r.room_number).unwrap_or_default(),
        checkin_date: reservation.checkin_date,
        checkout_date: reservation.checkout_date,
        nights: reservation.nights(),
        adults: reservation.adults,
        children: reservation.children,
        total_amount: reservation.total_amount,
        status: reservation.status,
    })))
}

/// Check the guest in; the linked room becomes occupied.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/check-in",
    params(("id" = Uuid, Path, description = "Reservation id")),
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Guest checked in"),
        (status = 400, description = "Reservation not eligible", body = crate::errors::ErrorResponse)
    ),
    tag = "reservations"
)]
pub async fn check_in(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<CheckinRequest>>,
) -> ApiResult<reservation::Model> {
    require_roles(&current, RECEPTION_ROLES)?;

    let checkin_time = payload.and_then(|Json(p)| p.checkin_time);
    let reservation = state
        .services
        .reservations
        .check_in(id, checkin_time, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}

/// Check the guest out; the linked room goes to cleaning.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/check-out",
    params(("id" = Uuid, Path, description = "Reservation id")),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Guest checked out"),
        (status = 400, description = "Reservation not eligible", body = crate::errors::ErrorResponse)
    ),
    tag = "reservations"
)]
pub async fn check_out(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<CheckoutRequest>>,
) -> ApiResult<reservation::Model> {
    require_roles(&current, RECEPTION_ROLES)?;

    let checkout_time = payload.and_then(|Json(p)| p.checkout_time);
    let reservation = state
        .services
        .reservations
        .check_out(id, checkout_time, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}

/// Cancel a reservation that has not been checked in.
#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation cancelled"),
        (status = 400, description = "Guest already checked in", body = crate::errors::ErrorResponse)
    ),
    tag = "reservations"
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<reservation::Model> {
    require_roles(&current, RECEPTION_ROLES)?;

    let reservation = state
        .services
        .reservations
        .cancel(id, Some(current.id))
        .await?;
    Ok(Json(ApiResponse::success(reservation)))
}
