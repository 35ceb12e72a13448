use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entities::{cart, order_item};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartDto {
    pub id: i32,
    pub total_quantity: i32,
    pub total_price: Decimal,
    pub items: Vec<OrderItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDto {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: Decimal,
}

pub fn to_cart_dto(cart: cart::Model, items: Vec<order_item::Model>) -> CartDto {
    CartDto {
        id: cart.id,
        total_quantity: cart.total_quantity,
        total_price: cart.total_price,
        items: items.into_iter().map(to_order_item_dto).collect(),
    }
}

pub fn to_order_item_dto(item: order_item::Model) -> OrderItemDto {
    OrderItemDto {
        id: item.id,
        product_id: item.product_id,
        quantity: item.quantity,
        price: item.price,
    }
}
