use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed tax rate applied to the order subtotal.
pub const TAX_RATE: Decimal = dec!(0.10);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[sea_orm(string_value = "dine_in")]
    DineIn,
    #[sea_orm(string_value = "takeaway")]
    Takeaway,
    #[sea_orm(string_value = "room_service")]
    RoomService,
    #[sea_orm(string_value = "delivery")]
    Delivery,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "preparing")]
    Preparing,
    #[sea_orm(string_value = "ready")]
    Ready,
    #[sea_orm(string_value = "served")]
    Served,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// The single state a forward transition must depart from.
    pub fn required_predecessor(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Confirmed => Some(OrderStatus::Pending),
            OrderStatus::Preparing => Some(OrderStatus::Confirmed),
            OrderStatus::Ready => Some(OrderStatus::Preparing),
            OrderStatus::Served => Some(OrderStatus::Ready),
            _ => None,
        }
    }
}

/// How the guest settled an F&B order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum OrderPaymentMethod {
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "card")]
    Card,
    #[sea_orm(string_value = "room_charge")]
    RoomCharge,
    #[sea_orm(string_value = "mobile_payment")]
    MobilePayment,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum OrderPaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    pub outlet_id: Uuid,
    /// NULL for walk-in customers
    #[sea_orm(nullable)]
    pub guest_id: Option<Uuid>,
    /// Link to the guest stay when charged to a room
    #[sea_orm(nullable)]
    pub reservation_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub table_number: Option<String>,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub service_charge: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    #[sea_orm(nullable)]
    pub payment_method: Option<OrderPaymentMethod>,
    pub payment_status: OrderPaymentStatus,
    #[sea_orm(nullable)]
    pub notes: Option<String>,
    #[sea_orm(nullable)]
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outlet::Entity",
        from = "Column::OutletId",
        to = "super::outlet::Column::Id"
    )]
    Outlet,
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::Id"
    )]
    Guest,
    #[sea_orm(
        belongs_to = "super::reservation::Entity",
        from = "Column::ReservationId",
        to = "super::reservation::Column::Id"
    )]
    Reservation,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::outlet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outlet.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_paid(&self) -> bool {
        self.payment_status == OrderPaymentStatus::Paid
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, OrderStatus::Served | OrderStatus::Paid)
    }

    /// Lines may only change while the kitchen has not started on the order.
    pub fn can_be_modified(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    pub fn can_be_cancelled(&self) -> bool {
        !matches!(self.status, OrderStatus::Served | OrderStatus::Paid)
    }
}

/// Computed monetary breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

/// subtotal = Σ line totals; tax = 10% of subtotal;
/// total = subtotal + tax + service charge − discount.
pub fn calculate_totals(
    line_totals: impl IntoIterator<Item = Decimal>,
    service_charge: Decimal,
    discount_amount: Decimal,
) -> OrderTotals {
    let subtotal: Decimal = line_totals.into_iter().sum();
    let tax_amount = subtotal * TAX_RATE;
    OrderTotals {
        subtotal,
        tax_amount,
        total_amount: subtotal + tax_amount + service_charge - discount_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_apply_fixed_tax_rate() {
        let totals = calculate_totals(
            [dec!(12.50), dec!(7.50)],
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(totals.subtotal, dec!(20.00));
        assert_eq!(totals.tax_amount, dec!(2.0000));
        assert_eq!(totals.total_amount, dec!(22.0000));
    }

    #[test]
    fn totals_include_service_charge_and_discount() {
        let totals = calculate_totals([dec!(100.00)], dec!(5.00), dec!(15.00));
        assert_eq!(totals.subtotal, dec!(100.00));
        assert_eq!(totals.tax_amount, dec!(10.0000));
        // 100 + 10 + 5 - 15
        assert_eq!(totals.total_amount, dec!(100.0000));
    }

    #[test]
    fn empty_order_totals_are_zero() {
        let totals = calculate_totals(Vec::<Decimal>::new(), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total_amount, Decimal::ZERO);
    }

    #[test]
    fn forward_transitions_require_exact_predecessor() {
        assert_eq!(
            OrderStatus::Confirmed.required_predecessor(),
            Some(OrderStatus::Pending)
        );
        assert_eq!(
            OrderStatus::Served.required_predecessor(),
            Some(OrderStatus::Ready)
        );
        assert_eq!(OrderStatus::Pending.required_predecessor(), None);
        assert_eq!(OrderStatus::Cancelled.required_predecessor(), None);
    }
}
