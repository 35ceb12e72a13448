use async_trait::async_trait;

use super::entities::order;
use crate::modules::payments::entities::payment;
use crate::modules::shipments::entities::{shipment, shipment_tracking};
use crate::shared::error::AppResult;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order and re-parents the given cart items onto it
    /// (`order_id` set, `cart_id` cleared), all in one transaction. The cart
    /// row itself is left in place until payment.
    async fn insert_from_cart(
        &self,
        order: order::Model,
        item_ids: Vec<i32>,
    ) -> AppResult<order::Model>;

    /// Point read scoped to the owning user; another user's order is
    /// indistinguishable from a missing one.
    async fn find_by_id_and_user(
        &self,
        order_id: i32,
        user_id: i32,
    ) -> AppResult<Option<order::Model>>;

    async fn find_page_by_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> AppResult<Vec<order::Model>>;

    async fn update(&self, order: order::Model) -> AppResult<order::Model>;

    /// The coupled payment transition: records the payment, creates the
    /// shipment with its initial tracking event, marks the order paid, and
    /// deletes the user's cart — as explicit ordered writes inside a single
    /// transaction.
    async fn complete_payment(
        &self,
        order: order::Model,
        payment: payment::Model,
        shipment: shipment::Model,
        tracking: shipment_tracking::Model,
        cart_id: Option<i32>,
    ) -> AppResult<(order::Model, payment::Model, shipment::Model)>;
}
