use async_trait::async_trait;

use super::entities::user;
use crate::shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>>;
    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<user::Model>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>>;
    /// Inserts a new user; the caller leaves `id` zeroed and the backend
    /// assigns it.
    async fn insert(&self, user: user::Model) -> AppResult<user::Model>;
}
