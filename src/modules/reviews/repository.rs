use async_trait::async_trait;

use super::entities::review;
use crate::shared::error::AppResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, review_id: i32) -> AppResult<Option<review::Model>>;
    async fn find_by_product(&self, product_id: i32) -> AppResult<Vec<review::Model>>;
    async fn find_by_product_and_user(
        &self,
        product_id: i32,
        user_id: i32,
    ) -> AppResult<Option<review::Model>>;
    async fn insert(&self, review: review::Model) -> AppResult<review::Model>;
    async fn update(&self, review: review::Model) -> AppResult<review::Model>;
}
