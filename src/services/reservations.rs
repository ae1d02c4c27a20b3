use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    entities::{
        audit_log::AuditAction,
        guest, reservation,
        reservation::ReservationStatus,
        room,
        room::RoomStatus,
        room_type,
    },
    errors::ServiceError,
    services::audit,
};

/// Input for creating a reservation. Field-level constraints are checked
/// at the request DTO; the service re-validates the cross-entity rules.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservation {
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub checkin_date: NaiveDate,
    pub checkout_date: NaiveDate,
    pub adults: i32,
    pub children: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReservation {
    pub checkin_date: Option<NaiveDate>,
    pub checkout_date: Option<NaiveDate>,
    pub adults: Option<i32>,
    pub children: Option<i32>,
    pub total_amount: Option<Decimal>,
    pub special_requests: Option<String>,
}

/// Front-desk reservation operations.
///
/// Check-in and check-out pair the reservation status change with the
/// linked room's status update; both rows are written in one transaction
/// so the side effect is atomic and visible here, not hidden in a model.
#[derive(Clone)]
pub struct ReservationService {
    db: Arc<DatabaseConnection>,
}

impl ReservationService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> Result<reservation::Model, ServiceError> {
        reservation::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Reservation {} not found", id)))
    }

    pub async fn list(
        &self,
        status: Option<ReservationStatus>,
        guest_id: Option<Uuid>,
    ) -> Result<Vec<reservation::Model>, ServiceError> {
        let mut query = reservation::Entity::find();
        if let Some(status) = status {
            query = query.filter(reservation::Column::Status.eq(status));
        }
        if let Some(guest_id) = guest_id {
            query = query.filter(reservation::Column::GuestId.eq(guest_id));
        }
        Ok(query
            .order_by_asc(reservation::Column::CheckinDate)
            .all(&*self.db)
            .await?)
    }

    /// Create a booking. The room must exist, not be under maintenance,
    /// and have no overlapping active reservation for the window. The
    /// stored total is base_price × nights, authoritative from here on.
    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateReservation,
        created_by: Option<Uuid>,
    ) -> Result<reservation::Model, ServiceError> {
        if input.checkout_date <= input.checkin_date {
            return Err(ServiceError::ValidationError(
                "Checkout date must be after checkin date".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        guest::Entity::find_by_id(input.guest_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Guest {} not found", input.guest_id)))?;

        let room = room::Entity::find_by_id(input.room_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Room {} not found", input.room_id)))?;

        if room.status == RoomStatus::Maintenance {
            return Err(ServiceError::ValidationError(
                "Room is under maintenance".to_string(),
            ));
        }

        let overlapping = reservation::Entity::find()
            .filter(reservation::Column::RoomId.eq(room.id))
            .filter(
                reservation::Column::Status
                    .is_in([ReservationStatus::Confirmed, ReservationStatus::CheckedIn]),
            )
            .filter(reservation::Column::CheckinDate.lt(input.checkout_date))
            .filter(reservation::Column::CheckoutDate.gt(input.checkin_date))
            .one(&txn)
            .await?;

        if overlapping.is_some() {
            return Err(ServiceError::Conflict(
                "Room is already reserved for the requested dates".to_string(),
            ));
        }

        let room_type = room_type::Entity::find_by_id(room.room_type_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!("Room type {} missing", room.room_type_id))
            })?;

        let nights = (input.checkout_date - input.checkin_date).num_days();
        let total_amount = room_type.base_price * Decimal::from(nights);

        let now = Utc::now();
        let id = Uuid::new_v4();
        let model = reservation::ActiveModel {
            id: Set(id),
            guest_id: Set(input.guest_id),
            room_id: Set(input.room_id),
            checkin_date: Set(input.checkin_date),
            checkout_date: Set(input.checkout_date),
            actual_checkin: Set(None),
            actual_checkout: Set(None),
            adults: Set(input.adults),
            children: Set(input.children),
            total_amount: Set(total_amount),
            status: Set(ReservationStatus::Confirmed),
            special_requests: Set(input.special_requests),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        audit::record(
            &txn,
            "reservations",
            id,
            AuditAction::Insert,
            None,
            Some(json!({ "status": "confirmed", "total_amount": model.total_amount })),
            created_by,
        )
        .await?;

        txn.commit().await?;

        info!(reservation_id = %id, "reservation created");
        Ok(model)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateReservation,
        changed_by: Option<Uuid>,
    ) -> Result<reservation::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let existing = reservation::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Reservation {} not found", id)))?;

        if !existing.is_active() {
            return Err(ServiceError::InvalidOperation(
                "Cannot update a completed or cancelled reservation".to_string(),
            ));
        }

        let checkin = input.checkin_date.unwrap_or(existing.checkin_date);
        let checkout = input.checkout_date.unwrap_or(existing.checkout_date);
        if checkout <= checkin {
            return Err(ServiceError::ValidationError(
                "Checkout date must be after checkin date".to_string(),
            ));
        }

        let old = json!({
            "checkin_date": existing.checkin_date,
            "checkout_date": existing.checkout_date,
            "total_amount": existing.total_amount,
        });

        let mut active: reservation::ActiveModel = existing.into();
        active.checkin_date = Set(checkin);
        active.checkout_date = Set(checkout);
        if let Some(adults) = input.adults {
            if adults <= 0 {
                return Err(ServiceError::ValidationError(
                    "Number of adults must be greater than 0".to_string(),
                ));
            }
            active.adults = Set(adults);
        }
        if let Some(children) = input.children {
            if children < 0 {
                return Err(ServiceError::ValidationError(
                    "Number of children cannot be negative".to_string(),
                ));
            }
            active.children = Set(children);
        }
        if let Some(total_amount) = input.total_amount {
            active.total_amount = Set(total_amount);
        }
        if let Some(requests) = input.special_requests {
            active.special_requests = Set(Some(requests));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;

        audit::record(
            &txn,
            "reservations",
            id,
            AuditAction::Update,
            Some(old),
            Some(json!({
                "checkin_date": updated.checkin_date,
                "checkout_date": updated.checkout_date,
                "total_amount": updated.total_amount,
            })),
            changed_by,
        )
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Check the guest in and mark the room occupied, atomically.
    #[instrument(skip(self))]
    pub async fn check_in(
        &self,
        id: Uuid,
        checkin_time: Option<DateTime<Utc>>,
        changed_by: Option<Uuid>,
    ) -> Result<reservation::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let reservation = reservation::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Reservation {} not found", id)))?;

        let today = Utc::now().date_naive();
        if !reservation.can_checkin(today) {
            return Err(ServiceError::InvalidOperation(
                "Cannot check in: reservation not eligible".to_string(),
            ));
        }

        let room = room::Entity::find_by_id(reservation.room_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!("Room {} missing", reservation.room_id))
            })?;

        let now = Utc::now();
        let mut active: reservation::ActiveModel = reservation.into();
        active.actual_checkin = Set(Some(checkin_time.unwrap_or(now)));
        active.status = Set(ReservationStatus::CheckedIn);
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        let mut room_active: room::ActiveModel = room.into();
        room_active.status = Set(RoomStatus::Occupied);
        room_active.updated_at = Set(now);
        room_active.update(&txn).await?;

        audit::record(
            &txn,
            "reservations",
            id,
            AuditAction::Update,
            Some(json!({ "status": "confirmed" })),
            Some(json!({ "status": "checked_in" })),
            changed_by,
        )
        .await?;

        txn.commit().await?;

        info!(reservation_id = %id, "guest checked in");
        Ok(updated)
    }

    /// Check the guest out and send the room to cleaning, atomically.
    #[instrument(skip(self))]
    pub async fn check_out(
        &self,
        id: Uuid,
        checkout_time: Option<DateTime<Utc>>,
        changed_by: Option<Uuid>,
    ) -> Result<reservation::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let reservation = reservation::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Reservation {} not found", id)))?;

        if !reservation.can_checkout() {
            return Err(ServiceError::InvalidOperation(
                "Cannot check out: reservation not eligible".to_string(),
            ));
        }

        let room = room::Entity::find_by_id(reservation.room_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::InternalError(format!("Room {} missing", reservation.room_id))
            })?;

        let now = Utc::now();
        let mut active: reservation::ActiveModel = reservation.into();
        active.actual_checkout = Set(Some(checkout_time.unwrap_or(now)));
        active.status = Set(ReservationStatus::CheckedOut);
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        let mut room_active: room::ActiveModel = room.into();
        room_active.status = Set(RoomStatus::Cleaning);
        room_active.updated_at = Set(now);
        room_active.update(&txn).await?;

        audit::record(
            &txn,
            "reservations",
            id,
            AuditAction::Update,
            Some(json!({ "status": "checked_in" })),
            Some(json!({ "status": "checked_out" })),
            changed_by,
        )
        .await?;

        txn.commit().await?;

        info!(reservation_id = %id, "guest checked out");
        Ok(updated)
    }

    /// Cancel a reservation. Forbidden once the guest has checked in;
    /// frees the room if it was marked occupied.
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        id: Uuid,
        changed_by: Option<Uuid>,
    ) -> Result<reservation::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let reservation = reservation::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Reservation {} not found", id)))?;

        if reservation.status == ReservationStatus::CheckedIn {
            return Err(ServiceError::InvalidOperation(
                "Cannot cancel: guest is already checked in".to_string(),
            ));
        }

        let old_status = reservation.status;
        let room = room::Entity::find_by_id(reservation.room_id).one(&txn).await?;

        let now = Utc::now();
        let mut active: reservation::ActiveModel = reservation.into();
        active.status = Set(ReservationStatus::Cancelled);
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        if let Some(room) = room {
            if room.status == RoomStatus::Occupied {
                let mut room_active: room::ActiveModel = room.into();
                room_active.status = Set(RoomStatus::Available);
                room_active.updated_at = Set(now);
                room_active.update(&txn).await?;
            }
        }

        audit::record(
            &txn,
            "reservations",
            id,
            AuditAction::Update,
            Some(json!({ "status": old_status })),
            Some(json!({ "status": "cancelled" })),
            changed_by,
        )
        .await?;

        txn.commit().await?;

        info!(reservation_id = %id, "reservation cancelled");
        Ok(updated)
    }

    /// Rooms bookable for a date window: not under maintenance and free
    /// of overlapping active reservations.
    pub async fn available_rooms(
        &self,
        checkin_date: NaiveDate,
        checkout_date: NaiveDate,
        room_type_id: Option<Uuid>,
    ) -> Result<Vec<room::Model>, ServiceError> {
        if checkout_date <= checkin_date {
            return Err(ServiceError::ValidationError(
                "Checkout date must be after checkin date".to_string(),
            ));
        }

        let mut query = room::Entity::find()
            .filter(room::Column::Status.ne(RoomStatus::Maintenance));
        if let Some(room_type_id) = room_type_id {
            query = query.filter(room::Column::RoomTypeId.eq(room_type_id));
        }
        let rooms = query
            .order_by_asc(room::Column::RoomNumber)
            .all(&*self.db)
            .await?;

        let blocked: Vec<Uuid> = reservation::Entity::find()
            .filter(
                Condition::all()
                    .add(
                        reservation::Column::Status
                            .is_in([ReservationStatus::Confirmed, ReservationStatus::CheckedIn]),
                    )
                    .add(reservation::Column::CheckinDate.lt(checkout_date))
                    .add(reservation::Column::CheckoutDate.gt(checkin_date)),
            )
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|r| r.room_id)
            .collect();

        Ok(rooms
            .into_iter()
            .filter(|room| !blocked.contains(&room.id))
            .collect())
    }
}
