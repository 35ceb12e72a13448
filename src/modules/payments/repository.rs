use async_trait::async_trait;

use super::entities::payment;
use crate::shared::error::AppResult;

/// Payments are only ever inserted through the order workflow's
/// `complete_payment` transaction; this trait covers the read side.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_order(&self, order_id: i32) -> AppResult<Option<payment::Model>>;
}
