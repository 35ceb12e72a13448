use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sub_category_id: Option<i32>,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub unit_price: Decimal,
    pub available_stock: i32,

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
        belongs_to = "super::sub_category::Entity",
        from = "Column::SubCategoryId",
        to = "super::sub_category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    SubCategory,
    #[sea_orm(has_many = "crate::modules::cart::entities::order_item::Entity")]
    OrderItems,
    #[sea_orm(has_many = "crate::modules::reviews::entities::review::Entity")]
    Reviews,
}

impl Related<super::sub_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubCategory.def()
    }
}

impl Related<crate::modules::cart::entities::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<crate::modules::reviews::entities::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
