use async_trait::async_trait;

use super::entities::{category, product, sub_category};
use crate::shared::error::AppResult;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<category::Model>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<category::Model>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<category::Model>>;
    async fn insert(&self, category: category::Model) -> AppResult<category::Model>;
    async fn update(&self, category: category::Model) -> AppResult<category::Model>;

    async fn find_subs_by_category(&self, category_id: i32)
        -> AppResult<Vec<sub_category::Model>>;
    async fn find_sub_by_name(
        &self,
        category_id: i32,
        name: &str,
    ) -> AppResult<Option<sub_category::Model>>;
    async fn insert_sub(&self, sub: sub_category::Model) -> AppResult<sub_category::Model>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<product::Model>>;
    async fn find_page(&self, page: u64, per_page: u64) -> AppResult<Vec<product::Model>>;
    async fn insert(&self, product: product::Model) -> AppResult<product::Model>;
    /// Full-row update, also used for stock adjustments from the cart
    /// workflow. No row locking; concurrent adjustments can race (see
    /// DESIGN.md).
    async fn update(&self, product: product::Model) -> AppResult<product::Model>;
}
