use async_trait::async_trait;

use super::entities::{cart, order_item};
use crate::shared::error::AppResult;

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// The user's current cart with its items, if any. One active cart per
    /// user is enforced by this lookup, not by a uniqueness constraint.
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> AppResult<Option<(cart::Model, Vec<order_item::Model>)>>;

    async fn insert_cart(&self, cart: cart::Model) -> AppResult<cart::Model>;

    /// Persists the cart's running totals together with one inserted or
    /// updated line (`item.id == 0` means insert). Stands in for the ORM
    /// cascade of the cart aggregate: both writes happen in one transaction.
    async fn save_cart_with_item(
        &self,
        cart: cart::Model,
        item: order_item::Model,
    ) -> AppResult<(cart::Model, order_item::Model)>;

    /// Detaches every item from the cart and deletes the cart row. Product
    /// stock is deliberately left untouched here; `release_products` is the
    /// separate opt-in restore path.
    async fn delete_cart(&self, cart_id: i32) -> AppResult<()>;

    /// Physical removal of a released item.
    async fn remove_item(&self, item_id: i32) -> AppResult<()>;

    async fn find_items_by_order(&self, order_id: i32) -> AppResult<Vec<order_item::Model>>;
}
