use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

use crate::modules::addresses::entities::address;
use crate::modules::addresses::repository::AddressRepository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::infra::memory::MemoryStore;

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct PostgresAddressRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresAddressRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn find_by_user(&self, user_id: i32) -> AppResult<Option<address::Model>> {
        address::Entity::find()
            .filter(address::Column::UserId.eq(user_id))
            .filter(address::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn insert(&self, address: address::Model) -> AppResult<address::Model> {
        let mut active = address.into_active_model();
        active.id = NotSet;
        active
            .insert(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn update(&self, address: address::Model) -> AppResult<address::Model> {
        address
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
pub struct InMemoryAddressRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryAddressRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn find_by_user(&self, user_id: i32) -> AppResult<Option<address::Model>> {
        let addresses = self.store.addresses.lock().unwrap();
        Ok(addresses
            .values()
            .find(|a| a.user_id == user_id && !a.deleted)
            .cloned())
    }

    async fn insert(&self, mut address: address::Model) -> AppResult<address::Model> {
        address.id = self.store.next_id();
        let mut addresses = self.store.addresses.lock().unwrap();
        addresses.insert(address.id, address.clone());
        Ok(address)
    }

    async fn update(&self, address: address::Model) -> AppResult<address::Model> {
        let mut addresses = self.store.addresses.lock().unwrap();
        addresses.insert(address.id, address.clone());
        Ok(address)
    }
}
