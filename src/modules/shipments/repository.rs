use async_trait::async_trait;

use super::entities::{shipment, shipment_tracking};
use crate::shared::error::AppResult;

/// Shipments are created inside the order workflow's `complete_payment`
/// transaction; reads and the cancellation update live here.
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    async fn find_by_order(&self, order_id: i32) -> AppResult<Option<shipment::Model>>;
    async fn find_trackings(&self, shipment_id: i32)
        -> AppResult<Vec<shipment_tracking::Model>>;
    async fn update(&self, shipment: shipment::Model) -> AppResult<shipment::Model>;
}
