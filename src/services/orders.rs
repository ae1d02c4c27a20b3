use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    entities::{
        audit_log::AuditAction,
        item, order,
        order::{OrderPaymentMethod, OrderPaymentStatus, OrderStatus, OrderType},
        order_line, outlet,
    },
    errors::ServiceError,
    services::audit,
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderLine {
    pub item_id: Uuid,
    pub quantity: i32,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub outlet_id: Uuid,
    pub guest_id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    pub table_number: Option<String>,
    pub order_type: OrderType,
    pub notes: Option<String>,
    #[serde(default)]
    pub order_lines: Vec<NewOrderLine>,
}

/// F&B order operations: creation, line mutation with price snapshots,
/// stage-by-stage status progression, payment, cancellation.
#[derive(Clone)]
pub struct OrderService {
    db: Arc<DatabaseConnection>,
}

impl OrderService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> Result<order::Model, ServiceError> {
        order::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn lines(&self, order_id: Uuid) -> Result<Vec<order_line::Model>, ServiceError> {
        Ok(order_line::Entity::find()
            .filter(order_line::Column::OrderId.eq(order_id))
            .order_by_asc(order_line::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    pub async fn list(
        &self,
        outlet_id: Option<Uuid>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<order::Model>, ServiceError> {
        let mut query = order::Entity::find();
        if let Some(outlet_id) = outlet_id {
            query = query.filter(order::Column::OutletId.eq(outlet_id));
        }
        if let Some(status) = status {
            query = query.filter(order::Column::Status.eq(status));
        }
        Ok(query
            .order_by_desc(order::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateOrder,
        created_by: Option<Uuid>,
    ) -> Result<order::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let outlet = outlet::Entity::find_by_id(input.outlet_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Outlet {} not found", input.outlet_id))
            })?;

        if !outlet.is_active {
            return Err(ServiceError::ValidationError(
                "Outlet is not active".to_string(),
            ));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let order = order::ActiveModel {
            id: Set(id),
            order_number: Set(generate_order_number()),
            outlet_id: Set(input.outlet_id),
            guest_id: Set(input.guest_id),
            reservation_id: Set(input.reservation_id),
            table_number: Set(input.table_number),
            order_type: Set(input.order_type),
            status: Set(OrderStatus::Pending),
            subtotal: Set(Decimal::ZERO),
            tax_amount: Set(Decimal::ZERO),
            service_charge: Set(Decimal::ZERO),
            discount_amount: Set(Decimal::ZERO),
            total_amount: Set(Decimal::ZERO),
            payment_method: Set(None),
            payment_status: Set(OrderPaymentStatus::Pending),
            notes: Set(input.notes),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        for line in &input.order_lines {
            upsert_line(&txn, &order, line).await?;
        }
        let order = recalculate_totals(&txn, order).await?;

        audit::record(
            &txn,
            "orders",
            id,
            AuditAction::Insert,
            None,
            Some(json!({ "order_number": order.order_number, "status": "pending" })),
            created_by,
        )
        .await?;

        txn.commit().await?;

        info!(order_id = %id, order_number = %order.order_number, "order created");
        Ok(order)
    }

    /// Add an item to an order. An item already on the order merges into
    /// its existing line with a summed quantity; a new item snapshots the
    /// current menu price. Only pending/confirmed orders may change.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        order_id: Uuid,
        line: NewOrderLine,
        changed_by: Option<Uuid>,
    ) -> Result<order::Model, ServiceError> {
        if line.quantity <= 0 {
            return Err(ServiceError::ValidationError(
                "Quantity must be greater than 0".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let order = order::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if !order.can_be_modified() {
            return Err(ServiceError::InvalidOperation(
                "Cannot modify order: order is not in modifiable state".to_string(),
            ));
        }

        upsert_line(&txn, &order, &line).await?;
        let order = recalculate_totals(&txn, order).await?;

        audit::record(
            &txn,
            "orders",
            order_id,
            AuditAction::Update,
            None,
            Some(json!({ "item_id": line.item_id, "quantity": line.quantity })),
            changed_by,
        )
        .await?;

        txn.commit().await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        changed_by: Option<Uuid>,
    ) -> Result<order::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let order = order::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if !order.can_be_modified() {
            return Err(ServiceError::InvalidOperation(
                "Cannot modify order: order is not in modifiable state".to_string(),
            ));
        }

        let line = order_line::Entity::find()
            .filter(order_line::Column::OrderId.eq(order_id))
            .filter(order_line::Column::ItemId.eq(item_id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Item {} is not on order {}", item_id, order_id))
            })?;

        line.delete(&txn).await?;
        let order = recalculate_totals(&txn, order).await?;

        audit::record(
            &txn,
            "orders",
            order_id,
            AuditAction::Update,
            Some(json!({ "item_id": item_id })),
            None,
            changed_by,
        )
        .await?;

        txn.commit().await?;
        Ok(order)
    }

    /// Advance an order one stage forward. Each target state names the
    /// exact state the order must currently be in; no stage skipping.
    #[instrument(skip(self))]
    pub async fn advance_status(
        &self,
        order_id: Uuid,
        target: OrderStatus,
        changed_by: Option<Uuid>,
    ) -> Result<order::Model, ServiceError> {
        let required = target.required_predecessor().ok_or_else(|| {
            ServiceError::ValidationError(format!("{:?} is not a forward stage", target))
        })?;

        let txn = self.db.begin().await?;

        let order = order::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if order.status != required {
            return Err(ServiceError::InvalidOperation(format!(
                "Can only move {:?} orders to {:?}",
                required, target
            )));
        }

        let old_status = order.status;
        let mut active: order::ActiveModel = order.into();
        active.status = Set(target);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        audit::record(
            &txn,
            "orders",
            order_id,
            AuditAction::Update,
            Some(json!({ "status": old_status })),
            Some(json!({ "status": target })),
            changed_by,
        )
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Settle the order. Guarded against double payment.
    #[instrument(skip(self))]
    pub async fn process_payment(
        &self,
        order_id: Uuid,
        method: OrderPaymentMethod,
        changed_by: Option<Uuid>,
    ) -> Result<order::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let order = order::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if order.payment_status == OrderPaymentStatus::Paid {
            return Err(ServiceError::InvalidOperation(
                "Order is already paid".to_string(),
            ));
        }

        let old_status = order.status;
        let mut active: order::ActiveModel = order.into();
        active.payment_method = Set(Some(method));
        active.payment_status = Set(OrderPaymentStatus::Paid);
        active.status = Set(OrderStatus::Paid);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        audit::record(
            &txn,
            "orders",
            order_id,
            AuditAction::Update,
            Some(json!({ "status": old_status, "payment_status": "pending" })),
            Some(json!({ "status": "paid", "payment_status": "paid" })),
            changed_by,
        )
        .await?;

        txn.commit().await?;

        info!(order_id = %order_id, "order paid");
        Ok(updated)
    }

    /// Cancel an order that has not been served or paid.
    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        order_id: Uuid,
        changed_by: Option<Uuid>,
    ) -> Result<order::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let order = order::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))?;

        if !order.can_be_cancelled() {
            return Err(ServiceError::InvalidOperation(
                "Cannot cancel served or paid orders".to_string(),
            ));
        }

        let old_status = order.status;
        let mut active: order::ActiveModel = order.into();
        active.status = Set(OrderStatus::Cancelled);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        audit::record(
            &txn,
            "orders",
            order_id,
            AuditAction::Update,
            Some(json!({ "status": old_status })),
            Some(json!({ "status": "cancelled" })),
            changed_by,
        )
        .await?;

        txn.commit().await?;
        Ok(updated)
    }
}

/// Insert a new line or merge into the existing line for the same item.
async fn upsert_line<C: ConnectionTrait>(
    conn: &C,
    order: &order::Model,
    line: &NewOrderLine,
) -> Result<(), ServiceError> {
    if line.quantity <= 0 {
        return Err(ServiceError::ValidationError(
            "Quantity must be greater than 0".to_string(),
        ));
    }

    let item = item::Entity::find_by_id(line.item_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", line.item_id)))?;

    if !item.is_available {
        return Err(ServiceError::ValidationError(format!(
            "Item '{}' is not available",
            item.name
        )));
    }

    let existing = order_line::Entity::find()
        .filter(order_line::Column::OrderId.eq(order.id))
        .filter(order_line::Column::ItemId.eq(line.item_id))
        .one(conn)
        .await?;

    let now = Utc::now();
    match existing {
        Some(found) => {
            let quantity = found.quantity + line.quantity;
            let unit_price = found.unit_price;
            let mut active: order_line::ActiveModel = found.into();
            active.quantity = Set(quantity);
            active.line_total = Set(order_line::line_total(quantity, unit_price));
            active.updated_at = Set(now);
            active.update(conn).await?;
        }
        None => {
            order_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order.id),
                item_id: Set(item.id),
                quantity: Set(line.quantity),
                unit_price: Set(item.price),
                line_total: Set(order_line::line_total(line.quantity, item.price)),
                special_instructions: Set(line.special_instructions.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(conn)
            .await?;
        }
    }

    Ok(())
}

/// Recompute subtotal/tax/total from the order's lines and persist.
async fn recalculate_totals<C: ConnectionTrait>(
    conn: &C,
    order: order::Model,
) -> Result<order::Model, ServiceError> {
    let lines = order_line::Entity::find()
        .filter(order_line::Column::OrderId.eq(order.id))
        .all(conn)
        .await?;

    let totals = order::calculate_totals(
        lines.iter().map(|l| l.line_total),
        order.service_charge,
        order.discount_amount,
    );

    let mut active: order::ActiveModel = order.into();
    active.subtotal = Set(totals.subtotal);
    active.tax_amount = Set(totals.tax_amount);
    active.total_amount = Set(totals.total_amount);
    active.updated_at = Set(Utc::now());
    Ok(active.update(conn).await?)
}

/// `ORD-YYYYMMDD-XXXXXX` with a random suffix; uniqueness is backed by
/// the order_number unique key.
fn generate_order_number() -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect::<String>()
        .to_uppercase();
    format!("ORD-{}-{}", Utc::now().format("%Y%m%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_numbers_have_expected_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), "ORD-20250301-ABC123".len());
        assert_ne!(number, generate_order_number());
    }
}
