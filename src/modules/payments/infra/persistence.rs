use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

use crate::modules::payments::entities::payment;
use crate::modules::payments::repository::PaymentRepository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::infra::memory::MemoryStore;

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct PostgresPaymentRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresPaymentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn find_by_order(&self, order_id: i32) -> AppResult<Option<payment::Model>> {
        payment::Entity::find()
            .filter(payment::Column::OrderId.eq(order_id))
            .filter(payment::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone)]
pub struct InMemoryPaymentRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryPaymentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_by_order(&self, order_id: i32) -> AppResult<Option<payment::Model>> {
        let payments = self.store.payments.lock().unwrap();
        Ok(payments
            .values()
            .find(|p| p.order_id == order_id && !p.deleted)
            .cloned())
    }
}
