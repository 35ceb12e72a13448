use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

use crate::modules::reviews::entities::review;
use crate::modules::reviews::repository::ReviewRepository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::infra::memory::MemoryStore;

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct PostgresReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresReviewRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn find_by_id(&self, review_id: i32) -> AppResult<Option<review::Model>> {
        review::Entity::find_by_id(review_id)
            .filter(review::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_product(&self, product_id: i32) -> AppResult<Vec<review::Model>> {
        review::Entity::find()
            .filter(review::Column::ProductId.eq(product_id))
            .filter(review::Column::Deleted.eq(false))
            .order_by_desc(review::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_product_and_user(
        &self,
        product_id: i32,
        user_id: i32,
    ) -> AppResult<Option<review::Model>> {
        review::Entity::find()
            .filter(review::Column::ProductId.eq(product_id))
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn insert(&self, review: review::Model) -> AppResult<review::Model> {
        let mut active = review.into_active_model();
        active.id = NotSet;
        active
            .insert(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn update(&self, review: review::Model) -> AppResult<review::Model> {
        review
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
pub struct InMemoryReviewRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryReviewRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find_by_id(&self, review_id: i32) -> AppResult<Option<review::Model>> {
        let reviews = self.store.reviews.lock().unwrap();
        Ok(reviews.get(&review_id).filter(|r| !r.deleted).cloned())
    }

    async fn find_by_product(&self, product_id: i32) -> AppResult<Vec<review::Model>> {
        let reviews = self.store.reviews.lock().unwrap();
        let mut found: Vec<_> = reviews
            .values()
            .filter(|r| r.product_id == product_id && !r.deleted)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_product_and_user(
        &self,
        product_id: i32,
        user_id: i32,
    ) -> AppResult<Option<review::Model>> {
        let reviews = self.store.reviews.lock().unwrap();
        Ok(reviews
            .values()
            .find(|r| r.product_id == product_id && r.user_id == user_id && !r.deleted)
            .cloned())
    }

    async fn insert(&self, mut review: review::Model) -> AppResult<review::Model> {
        review.id = self.store.next_id();
        let mut reviews = self.store.reviews.lock().unwrap();
        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update(&self, review: review::Model) -> AppResult<review::Model> {
        let mut reviews = self.store.reviews.lock().unwrap();
        reviews.insert(review.id, review.clone());
        Ok(review)
    }
}
