use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

use crate::modules::users::entities::user;
use crate::modules::users::repository::UserRepository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::infra::memory::MemoryStore;

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct PostgresUserRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        user::Entity::find_by_id(id)
            .filter(user::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<user::Model>> {
        user::Entity::find()
            .filter(user::Column::Uuid.eq(uuid))
            .filter(user::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn insert(&self, user: user::Model) -> AppResult<user::Model> {
        let mut active = user.into_active_model();
        active.id = NotSet;
        active.insert(self.db.as_ref()).await.map_err(AppError::DbError)
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        let users = self.store.users.lock().unwrap();
        Ok(users.get(&id).filter(|u| !u.deleted).cloned())
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<user::Model>> {
        let users = self.store.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.uuid == uuid && !u.deleted)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        let users = self.store.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.email == email && !u.deleted)
            .cloned())
    }

    async fn insert(&self, mut user: user::Model) -> AppResult<user::Model> {
        user.id = self.store.next_id();
        let mut users = self.store.users.lock().unwrap();
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
