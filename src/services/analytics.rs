use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entities::{
        guest, item, order,
        order::OrderStatus,
        order_line, outlet, payment,
        payment::{PaymentMethod, PaymentStatus, PaymentType},
        reservation,
        reservation::ReservationStatus,
        room,
        room::RoomStatus,
        room_type,
    },
    errors::ServiceError,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueToday {
    pub total_revenue: Decimal,
    pub room_revenue: Decimal,
    pub fnb_revenue: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OccupancySnapshot {
    pub total_rooms: u64,
    pub occupied_rooms: u64,
    pub available_rooms: u64,
    pub maintenance_rooms: u64,
    pub cleaning_rooms: u64,
    /// occupied / (total − maintenance) × 100, two decimals
    pub occupancy_rate: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopItemSold {
    pub item_id: Uuid,
    pub item_name: String,
    pub outlet_name: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopItemsSnapshot {
    pub items: Vec<TopItemSold>,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GuestSpending {
    pub guest_id: Uuid,
    pub guest_name: String,
    pub room_number: Option<String>,
    pub total_spending: Decimal,
    pub room_charges: Decimal,
    pub fnb_charges: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GuestSpendingSnapshot {
    pub guests: Vec<GuestSpending>,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueSplitItem {
    pub category: String,
    pub amount: Decimal,
    pub percentage: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueSplitSnapshot {
    pub total_revenue: Decimal,
    pub split: Vec<RevenueSplitItem>,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArprSnapshot {
    /// Average revenue per occupied room, two decimals
    pub arpr: Decimal,
    pub total_revenue: Decimal,
    pub occupied_rooms: u64,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OutletPerformance {
    pub outlet_id: Uuid,
    pub outlet_name: String,
    pub outlet_type: String,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub average_order_value: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OutletPerformanceSnapshot {
    pub outlets: Vec<OutletPerformance>,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomTypePerformance {
    pub room_type_id: Uuid,
    pub room_type_name: String,
    pub total_bookings: i64,
    pub total_revenue: Decimal,
    pub occupancy_rate: f64,
    pub average_rate: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomTypePerformanceSnapshot {
    pub room_types: Vec<RoomTypePerformance>,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethodBreakdown {
    pub payment_method: String,
    pub amount: Decimal,
    pub percentage: f64,
    pub transaction_count: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethodSnapshot {
    pub breakdown: Vec<PaymentMethodBreakdown>,
    pub total_amount: Decimal,
    pub date: NaiveDate,
}

/// One snapshot composing every KPI over the same "today".
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardKpis {
    pub revenue_today: RevenueToday,
    pub occupancy_rate: OccupancySnapshot,
    pub top_items: TopItemsSnapshot,
    pub guest_spending: GuestSpendingSnapshot,
    pub revenue_split: RevenueSplitSnapshot,
    pub arpr: ArprSnapshot,
}

/// Read-only KPI aggregation over the operational data.
///
/// Monetary sums stay in exact decimals; only the presentation values
/// (rates, percentages, averages) round to two decimals. Every ranking
/// breaks ties by id so the output is deterministic across runs.
#[derive(Clone)]
pub struct AnalyticsService {
    db: Arc<DatabaseConnection>,
}

impl AnalyticsService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[instrument(skip(self))]
    pub async fn revenue_today(&self) -> Result<RevenueToday, ServiceError> {
        self.revenue_for(Self::today()).await
    }

    async fn revenue_for(&self, today: NaiveDate) -> Result<RevenueToday, ServiceError> {
        let payments = self.completed_payments_on(today).await?;

        let mut total = Decimal::ZERO;
        let mut rooms = Decimal::ZERO;
        let mut fnb = Decimal::ZERO;
        for p in &payments {
            total += p.amount;
            match p.payment_type {
                PaymentType::RoomCharge => rooms += p.amount,
                PaymentType::FnbCharge => fnb += p.amount,
                _ => {}
            }
        }

        Ok(RevenueToday {
            total_revenue: total.round_dp(2),
            room_revenue: rooms.round_dp(2),
            fnb_revenue: fnb.round_dp(2),
            date: today,
        })
    }

    #[instrument(skip(self))]
    pub async fn occupancy_rate(&self) -> Result<OccupancySnapshot, ServiceError> {
        self.occupancy_for(Self::today()).await
    }

    async fn occupancy_for(&self, today: NaiveDate) -> Result<OccupancySnapshot, ServiceError> {
        let db = &*self.db;
        let total = room::Entity::find().count(db).await?;
        let occupied = self.count_rooms(RoomStatus::Occupied).await?;
        let available = self.count_rooms(RoomStatus::Available).await?;
        let maintenance = self.count_rooms(RoomStatus::Maintenance).await?;
        let cleaning = self.count_rooms(RoomStatus::Cleaning).await?;

        Ok(OccupancySnapshot {
            total_rooms: total,
            occupied_rooms: occupied,
            available_rooms: available,
            maintenance_rooms: maintenance,
            cleaning_rooms: cleaning,
            occupancy_rate: occupancy_rate_value(occupied, total, maintenance),
            date: today,
        })
    }

    #[instrument(skip(self))]
    pub async fn top_items_sold(&self) -> Result<TopItemsSnapshot, ServiceError> {
        self.top_items_for(Self::today()).await
    }

    async fn top_items_for(&self, today: NaiveDate) -> Result<TopItemsSnapshot, ServiceError> {
        let db = &*self.db;
        let orders = self.completed_orders_on(today).await?;
        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

        let mut sold: HashMap<Uuid, (i64, Decimal)> = HashMap::new();
        if !order_ids.is_empty() {
            let lines = order_line::Entity::find()
                .filter(order_line::Column::OrderId.is_in(order_ids))
                .all(db)
                .await?;
            for line in lines {
                let entry = sold.entry(line.item_id).or_insert((0, Decimal::ZERO));
                entry.0 += line.quantity as i64;
                entry.1 += line.line_total;
            }
        }

        let item_ids: Vec<Uuid> = sold.keys().copied().collect();
        let items: HashMap<Uuid, item::Model> = if item_ids.is_empty() {
            HashMap::new()
        } else {
            item::Entity::find()
                .filter(item::Column::Id.is_in(item_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|i| (i.id, i))
                .collect()
        };
        let outlet_names: HashMap<Uuid, String> = outlet::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|o| (o.id, o.name))
            .collect();

        let mut ranked: Vec<TopItemSold> = sold
            .into_iter()
            .filter_map(|(item_id, (quantity, revenue))| {
                items.get(&item_id).map(|item| TopItemSold {
                    item_id,
                    item_name: item.name.clone(),
                    outlet_name: outlet_names
                        .get(&item.outlet_id)
                        .cloned()
                        .unwrap_or_default(),
                    quantity_sold: quantity,
                    revenue: revenue.round_dp(2),
                })
            })
            .collect();

        // Quantity descending, item id ascending for a stable order
        ranked.sort_by(|a, b| {
            b.quantity_sold
                .cmp(&a.quantity_sold)
                .then(a.item_id.cmp(&b.item_id))
        });
        ranked.truncate(5);

        Ok(TopItemsSnapshot {
            items: ranked,
            date: today,
        })
    }

    #[instrument(skip(self))]
    pub async fn guest_spending(&self) -> Result<GuestSpendingSnapshot, ServiceError> {
        self.guest_spending_for(Self::today()).await
    }

    async fn guest_spending_for(
        &self,
        today: NaiveDate,
    ) -> Result<GuestSpendingSnapshot, ServiceError> {
        let db = &*self.db;

        // Only guests currently checked in are ranked.
        let checked_in = reservation::Entity::find()
            .filter(reservation::Column::Status.eq(ReservationStatus::CheckedIn))
            .all(db)
            .await?;
        let reservation_to_guest: HashMap<Uuid, Uuid> = checked_in
            .iter()
            .map(|r| (r.id, r.guest_id))
            .collect();
        let guest_room: HashMap<Uuid, Uuid> = checked_in
            .iter()
            .map(|r| (r.guest_id, r.room_id))
            .collect();

        let payments = self.completed_payments_on(today).await?;

        let payment_order_ids: Vec<Uuid> =
            payments.iter().filter_map(|p| p.order_id).collect();
        let order_guest: HashMap<Uuid, Option<Uuid>> = if payment_order_ids.is_empty() {
            HashMap::new()
        } else {
            order::Entity::find()
                .filter(order::Column::Id.is_in(payment_order_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|o| (o.id, o.guest_id))
                .collect()
        };

        let mut spending: HashMap<Uuid, (Decimal, Decimal, Decimal)> = HashMap::new();
        for p in &payments {
            let guest_id = p
                .reservation_id
                .and_then(|rid| reservation_to_guest.get(&rid).copied())
                .or_else(|| {
                    p.order_id
                        .and_then(|oid| order_guest.get(&oid).copied().flatten())
                        .filter(|gid| guest_room.contains_key(gid))
                });
            let Some(guest_id) = guest_id else { continue };

            let entry = spending
                .entry(guest_id)
                .or_insert((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
            entry.0 += p.amount;
            match p.payment_type {
                PaymentType::RoomCharge => entry.1 += p.amount,
                PaymentType::FnbCharge => entry.2 += p.amount,
                _ => {}
            }
        }

        let guest_ids: Vec<Uuid> = spending.keys().copied().collect();
        let guests: HashMap<Uuid, guest::Model> = if guest_ids.is_empty() {
            HashMap::new()
        } else {
            guest::Entity::find()
                .filter(guest::Column::Id.is_in(guest_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|g| (g.id, g))
                .collect()
        };
        let room_numbers: HashMap<Uuid, String> = room::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|r| (r.id, r.room_number))
            .collect();

        let mut ranked: Vec<GuestSpending> = spending
            .into_iter()
            .filter_map(|(guest_id, (total, rooms, fnb))| {
                guests.get(&guest_id).map(|g| GuestSpending {
                    guest_id,
                    guest_name: g.full_name(),
                    room_number: guest_room
                        .get(&guest_id)
                        .and_then(|rid| room_numbers.get(rid).cloned()),
                    total_spending: total.round_dp(2),
                    room_charges: rooms.round_dp(2),
                    fnb_charges: fnb.round_dp(2),
                })
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.total_spending
                .cmp(&a.total_spending)
                .then(a.guest_id.cmp(&b.guest_id))
        });
        ranked.truncate(10);

        Ok(GuestSpendingSnapshot {
            guests: ranked,
            date: today,
        })
    }

    #[instrument(skip(self))]
    pub async fn revenue_split(&self) -> Result<RevenueSplitSnapshot, ServiceError> {
        self.revenue_split_for(Self::today()).await
    }

    async fn revenue_split_for(
        &self,
        today: NaiveDate,
    ) -> Result<RevenueSplitSnapshot, ServiceError> {
        let payments = self.completed_payments_on(today).await?;

        let mut rooms = Decimal::ZERO;
        let mut fnb = Decimal::ZERO;
        for p in &payments {
            match p.payment_type {
                PaymentType::RoomCharge => rooms += p.amount,
                _ => fnb += p.amount,
            }
        }

        let (total, split) = split_items(rooms, fnb);
        Ok(RevenueSplitSnapshot {
            total_revenue: total,
            split,
            date: today,
        })
    }

    #[instrument(skip(self))]
    pub async fn average_revenue_per_room(&self) -> Result<ArprSnapshot, ServiceError> {
        self.arpr_for(Self::today()).await
    }

    async fn arpr_for(&self, today: NaiveDate) -> Result<ArprSnapshot, ServiceError> {
        let payments = self.completed_payments_on(today).await?;
        let room_revenue: Decimal = payments
            .iter()
            .filter(|p| p.payment_type == PaymentType::RoomCharge)
            .map(|p| p.amount)
            .sum();

        let occupied = self.count_rooms(RoomStatus::Occupied).await?;

        Ok(ArprSnapshot {
            arpr: arpr_value(room_revenue, occupied),
            total_revenue: room_revenue.round_dp(2),
            occupied_rooms: occupied,
            date: today,
        })
    }

    /// All KPIs over a single "today" reference.
    #[instrument(skip(self))]
    pub async fn dashboard_kpis(&self) -> Result<DashboardKpis, ServiceError> {
        let today = Self::today();
        Ok(DashboardKpis {
            revenue_today: self.revenue_for(today).await?,
            occupancy_rate: self.occupancy_for(today).await?,
            top_items: self.top_items_for(today).await?,
            guest_spending: self.guest_spending_for(today).await?,
            revenue_split: self.revenue_split_for(today).await?,
            arpr: self.arpr_for(today).await?,
        })
    }

    /// Per-outlet order count, revenue and average order value over
    /// today's served/paid orders. Outlets with no orders appear with
    /// zeroes.
    #[instrument(skip(self))]
    pub async fn outlet_performance(&self) -> Result<OutletPerformanceSnapshot, ServiceError> {
        let today = Self::today();
        let db = &*self.db;

        let outlets = outlet::Entity::find().all(db).await?;
        let orders = self.completed_orders_on(today).await?;

        let mut per_outlet: HashMap<Uuid, (i64, Decimal)> = HashMap::new();
        for o in &orders {
            let entry = per_outlet.entry(o.outlet_id).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += o.total_amount;
        }

        let mut rows: Vec<OutletPerformance> = outlets
            .into_iter()
            .map(|o| {
                let (count, revenue) =
                    per_outlet.get(&o.id).copied().unwrap_or((0, Decimal::ZERO));
                let average = if count > 0 {
                    (revenue / Decimal::from(count)).round_dp(2)
                } else {
                    Decimal::ZERO
                };
                OutletPerformance {
                    outlet_id: o.id,
                    outlet_name: o.name,
                    outlet_type: outlet_type_label(o.outlet_type).to_string(),
                    total_orders: count,
                    total_revenue: revenue.round_dp(2),
                    average_order_value: average,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            a.outlet_name
                .cmp(&b.outlet_name)
                .then(a.outlet_id.cmp(&b.outlet_id))
        });

        Ok(OutletPerformanceSnapshot {
            outlets: rows,
            date: today,
        })
    }

    /// Per room type: reservations covering today, their revenue, and
    /// the occupancy rate within the type.
    #[instrument(skip(self))]
    pub async fn room_type_performance(
        &self,
    ) -> Result<RoomTypePerformanceSnapshot, ServiceError> {
        let today = Self::today();
        let db = &*self.db;

        let types = room_type::Entity::find().all(db).await?;
        let rooms = room::Entity::find().all(db).await?;
        let room_to_type: HashMap<Uuid, Uuid> =
            rooms.iter().map(|r| (r.id, r.room_type_id)).collect();

        let active = reservation::Entity::find()
            .filter(
                reservation::Column::Status
                    .is_in([ReservationStatus::Confirmed, ReservationStatus::CheckedIn]),
            )
            .filter(reservation::Column::CheckinDate.lte(today))
            .filter(reservation::Column::CheckoutDate.gt(today))
            .all(db)
            .await?;

        let mut bookings: HashMap<Uuid, (i64, Decimal)> = HashMap::new();
        for r in &active {
            if let Some(type_id) = room_to_type.get(&r.room_id) {
                let entry = bookings.entry(*type_id).or_insert((0, Decimal::ZERO));
                entry.0 += 1;
                entry.1 += r.total_amount;
            }
        }

        let mut rows: Vec<RoomTypePerformance> = types
            .into_iter()
            .map(|t| {
                let type_rooms: Vec<&room::Model> =
                    rooms.iter().filter(|r| r.room_type_id == t.id).collect();
                let occupied = type_rooms
                    .iter()
                    .filter(|r| r.status == RoomStatus::Occupied)
                    .count() as u64;
                let (count, revenue) =
                    bookings.get(&t.id).copied().unwrap_or((0, Decimal::ZERO));
                let average = if count > 0 {
                    (revenue / Decimal::from(count)).round_dp(2)
                } else {
                    Decimal::ZERO
                };
                RoomTypePerformance {
                    room_type_id: t.id,
                    room_type_name: t.name,
                    total_bookings: count,
                    total_revenue: revenue.round_dp(2),
                    occupancy_rate: occupancy_rate_value(
                        occupied,
                        type_rooms.len() as u64,
                        0,
                    ),
                    average_rate: average,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            a.room_type_name
                .cmp(&b.room_type_name)
                .then(a.room_type_id.cmp(&b.room_type_id))
        });

        Ok(RoomTypePerformanceSnapshot {
            room_types: rows,
            date: today,
        })
    }

    /// Today's completed payments grouped by method.
    #[instrument(skip(self))]
    pub async fn payment_method_breakdown(&self) -> Result<PaymentMethodSnapshot, ServiceError> {
        let today = Self::today();
        let payments = self.completed_payments_on(today).await?;

        let total: Decimal = payments.iter().map(|p| p.amount).sum();
        let mut per_method: HashMap<&'static str, (Decimal, i64)> = HashMap::new();
        for p in &payments {
            let entry = per_method
                .entry(payment_method_label(p.payment_method))
                .or_insert((Decimal::ZERO, 0));
            entry.0 += p.amount;
            entry.1 += 1;
        }

        let mut breakdown: Vec<PaymentMethodBreakdown> = per_method
            .into_iter()
            .map(|(method, (amount, count))| PaymentMethodBreakdown {
                payment_method: method.to_string(),
                amount: amount.round_dp(2),
                percentage: share_percentage(amount, total),
                transaction_count: count,
            })
            .collect();

        breakdown.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then(a.payment_method.cmp(&b.payment_method))
        });

        Ok(PaymentMethodSnapshot {
            breakdown,
            total_amount: total.round_dp(2),
            date: today,
        })
    }

    async fn count_rooms(&self, status: RoomStatus) -> Result<u64, ServiceError> {
        Ok(room::Entity::find()
            .filter(room::Column::Status.eq(status))
            .count(&*self.db)
            .await?)
    }

    async fn completed_payments_on(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<payment::Model>, ServiceError> {
        let (start, end) = day_bounds(day);
        Ok(payment::Entity::find()
            .filter(payment::Column::Status.eq(PaymentStatus::Completed))
            .filter(payment::Column::CreatedAt.gte(start))
            .filter(payment::Column::CreatedAt.lt(end))
            .all(&*self.db)
            .await?)
    }

    async fn completed_orders_on(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<order::Model>, ServiceError> {
        let (start, end) = day_bounds(day);
        Ok(order::Entity::find()
            .filter(order::Column::Status.is_in([OrderStatus::Served, OrderStatus::Paid]))
            .filter(order::Column::CreatedAt.gte(start))
            .filter(order::Column::CreatedAt.lt(end))
            .all(&*self.db)
            .await?)
    }
}

fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_hms_opt(0, 0, 0).unwrap().and_utc();
    (start, start + Duration::days(1))
}

/// occupied / (total − maintenance) × 100, 0 when no operational rooms.
fn occupancy_rate_value(occupied: u64, total: u64, maintenance: u64) -> f64 {
    let operational = total.saturating_sub(maintenance);
    if operational == 0 {
        return 0.0;
    }
    let rate = Decimal::from(occupied) / Decimal::from(operational) * Decimal::from(100);
    rate.round_dp(2).to_f64().unwrap_or(0.0)
}

/// amount / total × 100, 0 when the total is 0.
fn share_percentage(amount: Decimal, total: Decimal) -> f64 {
    if total <= Decimal::ZERO {
        return 0.0;
    }
    (amount / total * Decimal::from(100))
        .round_dp(2)
        .to_f64()
        .unwrap_or(0.0)
}

/// room revenue / occupied rooms, 0 when none occupied.
fn arpr_value(room_revenue: Decimal, occupied_rooms: u64) -> Decimal {
    if occupied_rooms == 0 {
        return Decimal::ZERO;
    }
    (room_revenue / Decimal::from(occupied_rooms)).round_dp(2)
}

/// Rooms vs F&B breakdown, largest share first.
fn split_items(rooms: Decimal, fnb: Decimal) -> (Decimal, Vec<RevenueSplitItem>) {
    let total = rooms + fnb;
    let mut split: Vec<RevenueSplitItem> = [("Rooms", rooms), ("F&B", fnb)]
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(category, amount)| RevenueSplitItem {
            category: category.to_string(),
            amount: amount.round_dp(2),
            percentage: share_percentage(amount, total),
        })
        .collect();
    split.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
    (total.round_dp(2), split)
}

fn outlet_type_label(outlet_type: crate::entities::outlet::OutletType) -> &'static str {
    use crate::entities::outlet::OutletType;
    match outlet_type {
        OutletType::Restaurant => "restaurant",
        OutletType::Bar => "bar",
        OutletType::Cafe => "cafe",
        OutletType::RoomService => "room_service",
    }
}

fn payment_method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::Card => "card",
        PaymentMethod::MobilePayment => "mobile_payment",
        PaymentMethod::BankTransfer => "bank_transfer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn occupancy_excludes_maintenance_rooms() {
        // 4 occupied of (10 - 2) operational rooms
        assert_eq!(occupancy_rate_value(4, 10, 2), 50.00);
    }

    #[test]
    fn occupancy_is_zero_without_operational_rooms() {
        assert_eq!(occupancy_rate_value(0, 0, 0), 0.0);
        assert_eq!(occupancy_rate_value(0, 3, 3), 0.0);
    }

    #[test]
    fn split_matches_expected_percentages() {
        let (total, split) = split_items(dec!(100.00), dec!(50.00));
        assert_eq!(total, dec!(150.00));
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].category, "Rooms");
        assert_eq!(split[0].amount, dec!(100.00));
        assert_eq!(split[0].percentage, 66.67);
        assert_eq!(split[1].category, "F&B");
        assert_eq!(split[1].amount, dec!(50.00));
        assert_eq!(split[1].percentage, 33.33);
    }

    #[test]
    fn split_is_empty_when_no_revenue() {
        let (total, split) = split_items(Decimal::ZERO, Decimal::ZERO);
        assert_eq!(total, Decimal::ZERO);
        assert!(split.is_empty());
    }

    #[test]
    fn arpr_divides_room_revenue_by_occupied_rooms() {
        assert_eq!(arpr_value(dec!(500.00), 5), dec!(100.00));
        assert_eq!(arpr_value(dec!(500.00), 0), Decimal::ZERO);
        assert_eq!(arpr_value(dec!(100.00), 3), dec!(33.33));
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        assert_eq!(share_percentage(dec!(10), Decimal::ZERO), 0.0);
    }

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let (start, end) = day_bounds(day);
        assert_eq!(end - start, Duration::days(1));
        assert_eq!(start.date_naive(), day);
    }
}
