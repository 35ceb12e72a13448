use async_trait::async_trait;

use super::entities::address;
use crate::shared::error::AppResult;

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn find_by_user(&self, user_id: i32) -> AppResult<Option<address::Model>>;
    async fn insert(&self, address: address::Model) -> AppResult<address::Model>;
    async fn update(&self, address: address::Model) -> AppResult<address::Model>;
}
