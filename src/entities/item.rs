use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub category_id: Option<Uuid>,
    pub outlet_id: Uuid,
    pub price: Decimal,
    /// Cost price, for margin reporting
    #[sea_orm(nullable)]
    pub cost: Option<Decimal>,
    pub is_available: bool,
    /// Preparation time in minutes
    #[sea_orm(nullable)]
    pub preparation_time: Option<i32>,
    /// Vec<String> serialized
    #[sea_orm(column_type = "Json")]
    pub allergens: Json,
    /// Vec<String> serialized (vegetarian, vegan, gluten-free, ...)
    #[sea_orm(column_type = "Json")]
    pub dietary_info: Json,
    #[sea_orm(nullable)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item_category::Entity",
        from = "Column::CategoryId",
        to = "super::item_category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::outlet::Entity",
        from = "Column::OutletId",
        to = "super::outlet::Column::Id"
    )]
    Outlet,
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
}

impl Related<super::item_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::outlet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outlet.def()
    }
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Margin over cost as a percentage; zero when no cost is recorded.
    pub fn profit_margin(&self) -> Decimal {
        match self.cost {
            Some(cost) if cost > Decimal::ZERO => {
                (self.price - cost) / cost * Decimal::from(100)
            }
            _ => Decimal::ZERO,
        }
    }
}
