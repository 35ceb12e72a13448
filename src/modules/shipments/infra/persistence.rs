use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

use crate::modules::shipments::entities::{shipment, shipment_tracking};
use crate::modules::shipments::repository::ShipmentRepository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::infra::memory::MemoryStore;

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct PostgresShipmentRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresShipmentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ShipmentRepository for PostgresShipmentRepository {
    async fn find_by_order(&self, order_id: i32) -> AppResult<Option<shipment::Model>> {
        shipment::Entity::find()
            .filter(shipment::Column::OrderId.eq(order_id))
            .filter(shipment::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_trackings(
        &self,
        shipment_id: i32,
    ) -> AppResult<Vec<shipment_tracking::Model>> {
        shipment_tracking::Entity::find()
            .filter(shipment_tracking::Column::ShipmentId.eq(shipment_id))
            .filter(shipment_tracking::Column::Deleted.eq(false))
            .order_by_asc(shipment_tracking::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn update(&self, shipment: shipment::Model) -> AppResult<shipment::Model> {
        shipment
            .into_active_model()
            .reset_all()
            .update(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone)]
pub struct InMemoryShipmentRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryShipmentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ShipmentRepository for InMemoryShipmentRepository {
    async fn find_by_order(&self, order_id: i32) -> AppResult<Option<shipment::Model>> {
        let shipments = self.store.shipments.lock().unwrap();
        Ok(shipments
            .values()
            .find(|s| s.order_id == order_id && !s.deleted)
            .cloned())
    }

    async fn find_trackings(
        &self,
        shipment_id: i32,
    ) -> AppResult<Vec<shipment_tracking::Model>> {
        let trackings = self.store.shipment_trackings.lock().unwrap();
        let mut found: Vec<_> = trackings
            .values()
            .filter(|t| t.shipment_id == shipment_id && !t.deleted)
            .cloned()
            .collect();
        found.sort_by_key(|t| t.id);
        Ok(found)
    }

    async fn update(&self, shipment: shipment::Model) -> AppResult<shipment::Model> {
        let mut shipments = self.store.shipments.lock().unwrap();
        shipments.insert(shipment.id, shipment.clone());
        Ok(shipment)
    }
}
