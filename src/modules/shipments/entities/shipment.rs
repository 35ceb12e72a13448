use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Delivery record created when an order is paid. Owns an append-only list of
/// tracking events.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "shipments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_id: i32,
    pub status: super::enums::ShipmentStatus,

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
        belongs_to = "crate::modules::orders::entities::order::Entity",
        from = "Column::OrderId",
        to = "crate::modules::orders::entities::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
    #[sea_orm(has_many = "super::shipment_tracking::Entity")]
    Trackings,
}

impl Related<crate::modules::orders::entities::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::shipment_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trackings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
