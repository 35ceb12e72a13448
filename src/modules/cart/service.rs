use std::sync::Arc;

use rust_decimal::Decimal;

use super::dtos::{to_cart_dto, CartDto};
use super::entities::{cart, order_item};
use super::repository::CartRepository;
use crate::modules::catalog::repository::ProductRepository;
use crate::shared::audit;
use crate::shared::error::{AppError, AppResult};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AddItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

/// Cart workflow: accumulates order-items for a user and reserves product
/// stock as lines are added or updated. Stock writes go through the product
/// repository without row locking; two concurrent adds against the same
/// product can race (observed behavior, kept as-is).
pub struct CartService {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CartService {
    pub fn new(carts: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { carts, products }
    }

    pub async fn get_cart(&self, user_id: i32) -> AppResult<CartDto> {
        let (cart, items) = self
            .carts
            .find_by_user(user_id)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(to_cart_dto(cart, items))
    }

    /// Adds lines to the user's cart, creating the cart on first use. An
    /// incoming line for a product already in the cart is an absolute
    /// quantity update, not an increment.
    pub async fn add_to_cart(
        &self,
        actor: &str,
        user_id: i32,
        requests: Vec<AddItemRequest>,
    ) -> AppResult<CartDto> {
        let stamp = audit::stamp(actor);

        let (mut cart, mut items) = match self.carts.find_by_user(user_id).await? {
            Some(found) => found,
            None => {
                let created = self
                    .carts
                    .insert_cart(cart::Model {
                        id: 0,
                        user_id,
                        total_quantity: 0,
                        total_price: Decimal::ZERO,
                        created_at: stamp.at,
                        created_by: stamp.by.clone(),
                        updated_at: stamp.at,
                        updated_by: stamp.by.clone(),
                        deleted: false,
                    })
                    .await?;
                (created, Vec::new())
            }
        };

        for request in requests {
            if request.quantity <= 0 {
                return Err(AppError::BadRequest(
                    "quantity must be positive".to_string(),
                ));
            }

            let mut product = self
                .products
                .find_by_id(request.product_id)
                .await?
                .ok_or(AppError::NotFound)?;

            let existing = items
                .iter_mut()
                .find(|i| i.product_id == request.product_id);

            match existing {
                Some(item) => {
                    // Update path: the previously reserved quantity counts as
                    // available again before re-validating.
                    let available = product.available_stock + item.quantity;
                    if available < request.quantity {
                        return Err(AppError::Conflict(format!(
                            "Not enough stock for product {}",
                            product.id
                        )));
                    }

                    let new_price = product.unit_price * Decimal::from(request.quantity);

                    cart.total_quantity += request.quantity - item.quantity;
                    cart.total_price += new_price - item.price;
                    cart.updated_at = stamp.at;
                    cart.updated_by = stamp.by.clone();

                    product.available_stock = available - request.quantity;
                    product.updated_at = stamp.at;
                    product.updated_by = stamp.by.clone();
                    self.products.update(product).await?;

                    item.quantity = request.quantity;
                    item.price = new_price;
                    item.updated_at = stamp.at;
                    item.updated_by = stamp.by.clone();

                    let (saved_cart, saved_item) = self
                        .carts
                        .save_cart_with_item(cart.clone(), item.clone())
                        .await?;
                    cart = saved_cart;
                    *item = saved_item;
                }
                None => {
                    if product.available_stock < request.quantity {
                        return Err(AppError::Conflict(format!(
                            "Not enough stock for product {}",
                            product.id
                        )));
                    }

                    let price = product.unit_price * Decimal::from(request.quantity);

                    cart.total_quantity += request.quantity;
                    cart.total_price += price;
                    cart.updated_at = stamp.at;
                    cart.updated_by = stamp.by.clone();

                    product.available_stock -= request.quantity;
                    product.updated_at = stamp.at;
                    product.updated_by = stamp.by.clone();
                    self.products.update(product).await?;

                    let item = order_item::Model {
                        id: 0,
                        cart_id: Some(cart.id),
                        order_id: None,
                        product_id: request.product_id,
                        quantity: request.quantity,
                        price,
                        created_at: stamp.at,
                        created_by: stamp.by.clone(),
                        updated_at: stamp.at,
                        updated_by: stamp.by.clone(),
                        deleted: false,
                    };

                    let (saved_cart, saved_item) =
                        self.carts.save_cart_with_item(cart.clone(), item).await?;
                    cart = saved_cart;
                    items.push(saved_item);
                }
            }
        }

        tracing::debug!(cart = cart.id, "cart updated");
        Ok(to_cart_dto(cart, items))
    }

    /// Deletes the user's cart without restoring product stock; restoration
    /// is only performed by `release_products`.
    pub async fn delete_cart(&self, user_id: i32) -> AppResult<()> {
        let (cart, _) = self
            .carts
            .find_by_user(user_id)
            .await?
            .ok_or(AppError::NotFound)?;
        self.carts.delete_cart(cart.id).await
    }

    /// Returns each item's quantity to product stock and removes the item.
    pub async fn release_products(
        &self,
        actor: &str,
        items: &[order_item::Model],
    ) -> AppResult<()> {
        let stamp = audit::stamp(actor);
        for item in items {
            let mut product = self
                .products
                .find_by_id(item.product_id)
                .await?
                .ok_or(AppError::NotFound)?;

            product.available_stock += item.quantity;
            product.updated_at = stamp.at;
            product.updated_by = stamp.by.clone();
            self.products.update(product).await?;

            self.carts.remove_item(item.id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cart::infra::persistence::InMemoryCartRepository;
    use crate::modules::catalog::entities::product;
    use crate::modules::catalog::infra::persistence::InMemoryProductRepository;
    use crate::shared::infra::memory::MemoryStore;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<MemoryStore>, CartService) {
        let store = Arc::new(MemoryStore::new());
        let service = CartService::new(
            Arc::new(InMemoryCartRepository::new(store.clone())),
            Arc::new(InMemoryProductRepository::new(store.clone())),
        );
        (store, service)
    }

    fn seed_product(store: &MemoryStore, unit_price: Decimal, stock: i32) -> i32 {
        let id = store.next_id();
        let stamp = audit::stamp("seed");
        store.products.lock().unwrap().insert(
            id,
            product::Model {
                id,
                sub_category_id: None,
                name: format!("product-{}", id),
                description: None,
                unit_price,
                available_stock: stock,
                created_at: stamp.at,
                created_by: stamp.by.clone(),
                updated_at: stamp.at,
                updated_by: stamp.by,
                deleted: false,
            },
        );
        id
    }

    fn stock_of(store: &MemoryStore, product_id: i32) -> i32 {
        store
            .products
            .lock()
            .unwrap()
            .get(&product_id)
            .unwrap()
            .available_stock
    }

    #[tokio::test]
    async fn add_reserves_stock_and_updates_totals() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(10.00), 5);

        let cart = svc
            .add_to_cart(
                "u1",
                1,
                vec![AddItemRequest {
                    product_id,
                    quantity: 3,
                }],
            )
            .await
            .unwrap();

        assert_eq!(stock_of(&store, product_id), 2);
        assert_eq!(cart.total_quantity, 3);
        assert_eq!(cart.total_price, dec!(30.00));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].price, dec!(30.00));
    }

    #[tokio::test]
    async fn insufficient_stock_rejects_and_leaves_state_unchanged() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(10.00), 5);

        let err = svc
            .add_to_cart(
                "u1",
                1,
                vec![AddItemRequest {
                    product_id,
                    quantity: 6,
                }],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(stock_of(&store, product_id), 5);
        let cart = svc.get_cart(1).await.unwrap();
        assert_eq!(cart.total_quantity, 0);
        assert_eq!(cart.total_price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn update_path_replaces_quantity_and_recomputes_totals() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(10.00), 5);

        svc.add_to_cart(
            "u1",
            1,
            vec![AddItemRequest {
                product_id,
                quantity: 3,
            }],
        )
        .await
        .unwrap();
        assert_eq!(stock_of(&store, product_id), 2);

        // 2 in stock + 3 already reserved covers the new quantity of 4.
        let cart = svc
            .add_to_cart(
                "u1",
                1,
                vec![AddItemRequest {
                    product_id,
                    quantity: 4,
                }],
            )
            .await
            .unwrap();

        assert_eq!(stock_of(&store, product_id), 1);
        assert_eq!(cart.items[0].quantity, 4);
        assert_eq!(cart.total_quantity, 4);
        assert_eq!(cart.total_price, dec!(40.00));
    }

    #[tokio::test]
    async fn update_path_rejects_when_even_reclaimed_stock_is_short() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(1.00), 5);

        svc.add_to_cart(
            "u1",
            1,
            vec![AddItemRequest {
                product_id,
                quantity: 3,
            }],
        )
        .await
        .unwrap();

        // 2 left + 3 reserved = 5 < 6
        let err = svc
            .add_to_cart(
                "u1",
                1,
                vec![AddItemRequest {
                    product_id,
                    quantity: 6,
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(stock_of(&store, product_id), 2);
    }

    #[tokio::test]
    async fn delete_cart_does_not_restore_stock() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(2.00), 10);

        svc.add_to_cart(
            "u1",
            1,
            vec![AddItemRequest {
                product_id,
                quantity: 4,
            }],
        )
        .await
        .unwrap();
        assert_eq!(stock_of(&store, product_id), 6);

        svc.delete_cart(1).await.unwrap();

        assert!(matches!(svc.get_cart(1).await, Err(AppError::NotFound)));
        // Plain cart deletion forfeits the reservation.
        assert_eq!(stock_of(&store, product_id), 6);
    }

    #[tokio::test]
    async fn release_products_restores_stock_and_removes_items() {
        let (store, svc) = setup();
        let product_id = seed_product(&store, dec!(2.00), 10);

        let cart = svc
            .add_to_cart(
                "u1",
                1,
                vec![AddItemRequest {
                    product_id,
                    quantity: 4,
                }],
            )
            .await
            .unwrap();
        assert_eq!(stock_of(&store, product_id), 6);

        let items: Vec<_> = store
            .order_items
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.cart_id == Some(cart.id))
            .cloned()
            .collect();
        svc.release_products("u1", &items).await.unwrap();

        assert_eq!(stock_of(&store, product_id), 10);
        assert!(store.order_items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let (_store, svc) = setup();
        let err = svc
            .add_to_cart(
                "u1",
                1,
                vec![AddItemRequest {
                    product_id: 999,
                    quantity: 1,
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
