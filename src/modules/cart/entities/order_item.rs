use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A priced, quantity-bound line referencing one product. Owned by a cart
/// before checkout and re-parented to an order when the order is placed; the
/// two parent references are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub cart_id: Option<i32>,
    pub order_id: Option<i32>,
    pub product_id: i32,
    pub quantity: i32,
    /// Unit price x quantity at the time the line was (last) written.
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price: Decimal,

    #[serde(skip_deserializing)]
    pub created_at: DateTime,
    pub created_by: String,
    #[serde(skip_deserializing)]
    pub updated_at: DateTime,
    pub updated_by: String,
    #[serde(skip_serializing)]
    pub deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cart::Entity",
        from = "Column::CartId",
        to = "super::cart::Column::Id",
        on_delete = "SetNull"
    )]
    Cart,
    #[sea_orm(
        belongs_to = "crate::modules::orders::entities::order::Entity",
        from = "Column::OrderId",
        to = "crate::modules::orders::entities::order::Column::Id",
        on_delete = "SetNull"
    )]
    Order,
    #[sea_orm(
        belongs_to = "crate::modules::catalog::entities::product::Entity",
        from = "Column::ProductId",
        to = "crate::modules::catalog::entities::product::Column::Id"
    )]
    Product,
}

impl Related<super::cart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<crate::modules::orders::entities::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<crate::modules::catalog::entities::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
