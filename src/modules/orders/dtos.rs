use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entities::{enums::OrderStatus, order};
use crate::modules::cart::dtos::{to_order_item_dto, OrderItemDto};
use crate::modules::cart::entities::order_item;
use crate::modules::payments::entities::{enums::PaymentStatus, payment};
use crate::modules::shipments::entities::{
    enums::ShipmentStatus, shipment, shipment_tracking,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: i32,
    pub status: OrderStatus,
    pub quantity: i32,
    pub price: Decimal,
    pub delivery_date: NaiveDateTime,
    pub address_id: Option<i32>,
    pub items: Vec<OrderItemDto>,
    pub payment: Option<PaymentDto>,
    pub shipment: Option<ShipmentDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDto {
    pub id: i32,
    pub payment_mode: String,
    pub price: Decimal,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentDto {
    pub id: i32,
    pub status: ShipmentStatus,
    pub trackings: Vec<ShipmentTrackingDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentTrackingDto {
    pub id: i32,
    pub location: String,
    pub status: ShipmentStatus,
}

pub fn to_order_dto(
    order: order::Model,
    items: Vec<order_item::Model>,
    payment: Option<payment::Model>,
    shipment: Option<(shipment::Model, Vec<shipment_tracking::Model>)>,
) -> OrderDto {
    OrderDto {
        id: order.id,
        status: order.status,
        quantity: order.quantity,
        price: order.price,
        delivery_date: order.delivery_date,
        address_id: order.address_id,
        items: items.into_iter().map(to_order_item_dto).collect(),
        payment: payment.map(to_payment_dto),
        shipment: shipment.map(|(s, trackings)| to_shipment_dto(s, trackings)),
    }
}

pub fn to_payment_dto(payment: payment::Model) -> PaymentDto {
    PaymentDto {
        id: payment.id,
        payment_mode: payment.payment_mode,
        price: payment.price,
        status: payment.status,
    }
}

pub fn to_shipment_dto(
    shipment: shipment::Model,
    trackings: Vec<shipment_tracking::Model>,
) -> ShipmentDto {
    ShipmentDto {
        id: shipment.id,
        status: shipment.status,
        trackings: trackings.into_iter().map(to_tracking_dto).collect(),
    }
}

pub fn to_tracking_dto(tracking: shipment_tracking::Model) -> ShipmentTrackingDto {
    ShipmentTrackingDto {
        id: tracking.id,
        location: tracking.location,
        status: tracking.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn order_dto_round_trips_through_json() {
        let stamp = crate::shared::audit::stamp("u1");
        let order = order::Model {
            id: 7,
            user_id: 3,
            address_id: Some(11),
            status: OrderStatus::Pending,
            quantity: 4,
            price: dec!(99.9900),
            delivery_date: stamp.at + chrono::Duration::days(3),
            created_at: stamp.at,
            created_by: stamp.by.clone(),
            updated_at: stamp.at,
            updated_by: stamp.by,
            deleted: false,
        };

        let dto = to_order_dto(order.clone(), vec![], None, None);
        let json = serde_json::to_string(&dto).unwrap();
        let back: OrderDto = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, order.id);
        assert_eq!(back.status, order.status);
        assert_eq!(back.quantity, order.quantity);
        assert_eq!(back.price, order.price);
        assert_eq!(back.delivery_date, order.delivery_date);
    }
}
