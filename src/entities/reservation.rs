use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "checked_in")]
    CheckedIn,
    #[sea_orm(string_value = "checked_out")]
    CheckedOut,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// A stay booking. Check-in/check-out/cancel are driven by the
/// reservation service, which pairs the status change with the linked
/// room's status update in one transaction.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub checkin_date: Date,
    pub checkout_date: Date,
    #[sea_orm(nullable)]
    pub actual_checkin: Option<DateTime<Utc>>,
    #[sea_orm(nullable)]
    pub actual_checkout: Option<DateTime<Utc>>,
    pub adults: i32,
    pub children: i32,
    pub total_amount: Decimal,
    pub status: ReservationStatus,
    #[sea_orm(nullable)]
    pub special_requests: Option<String>,
    #[sea_orm(nullable)]
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::Id"
    )]
    Guest,
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id"
    )]
    Room,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.checkout_date - self.checkin_date).num_days()
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::Confirmed | ReservationStatus::CheckedIn
        )
    }

    pub fn is_current(&self) -> bool {
        self.status == ReservationStatus::CheckedIn
    }

    /// Eligible for check-in: confirmed, arrival date reached, and no
    /// earlier check-in recorded.
    pub fn can_checkin(&self, today: NaiveDate) -> bool {
        self.status == ReservationStatus::Confirmed
            && self.checkin_date <= today
            && self.actual_checkin.is_none()
    }

    pub fn can_checkout(&self) -> bool {
        self.status == ReservationStatus::CheckedIn && self.actual_checkout.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reservation(status: ReservationStatus) -> Model {
        let checkin = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        Model {
            id: Uuid::new_v4(),
            guest_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            checkin_date: checkin,
            checkout_date: NaiveDate::from_ymd_opt(2025, 3, 13).unwrap(),
            actual_checkin: None,
            actual_checkout: None,
            adults: 2,
            children: 0,
            total_amount: dec!(360.00),
            status,
            special_requests: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn nights_is_date_difference() {
        let r = reservation(ReservationStatus::Confirmed);
        assert_eq!(r.nights(), 3);
    }

    #[test]
    fn checkin_requires_confirmed_and_arrival_date() {
        let r = reservation(ReservationStatus::Confirmed);
        let arrival = r.checkin_date;
        assert!(r.can_checkin(arrival));
        assert!(r.can_checkin(arrival + chrono::Duration::days(1)));
        // Early arrival is not eligible
        assert!(!r.can_checkin(arrival - chrono::Duration::days(1)));
    }

    #[test]
    fn checkin_rejected_after_first_checkin() {
        let mut r = reservation(ReservationStatus::Confirmed);
        r.actual_checkin = Some(Utc::now());
        assert!(!r.can_checkin(r.checkin_date));
    }

    #[test]
    fn checkout_only_from_checked_in() {
        assert!(reservation(ReservationStatus::CheckedIn).can_checkout());
        assert!(!reservation(ReservationStatus::Confirmed).can_checkout());
        assert!(!reservation(ReservationStatus::CheckedOut).can_checkout());
        assert!(!reservation(ReservationStatus::Cancelled).can_checkout());
    }

    #[test]
    fn active_covers_confirmed_and_checked_in() {
        assert!(reservation(ReservationStatus::Confirmed).is_active());
        assert!(reservation(ReservationStatus::CheckedIn).is_active());
        assert!(!reservation(ReservationStatus::CheckedOut).is_active());
    }
}
