use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

use crate::modules::cart::entities::{cart, order_item};
use crate::modules::cart::repository::CartRepository;
use crate::shared::error::{AppError, AppResult};
use crate::shared::infra::memory::MemoryStore;

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct PostgresCartRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresCartRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> AppResult<Option<(cart::Model, Vec<order_item::Model>)>> {
        let cart = cart::Entity::find()
            .filter(cart::Column::UserId.eq(user_id))
            .filter(cart::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)?;

        match cart {
            Some(cart) => {
                let items = order_item::Entity::find()
                    .filter(order_item::Column::CartId.eq(cart.id))
                    .filter(order_item::Column::Deleted.eq(false))
                    .order_by_asc(order_item::Column::Id)
                    .all(self.db.as_ref())
                    .await
                    .map_err(AppError::DbError)?;
                Ok(Some((cart, items)))
            }
            None => Ok(None),
        }
    }

    async fn insert_cart(&self, cart: cart::Model) -> AppResult<cart::Model> {
        let mut active = cart.into_active_model();
        active.id = NotSet;
        active
            .insert(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn save_cart_with_item(
        &self,
        cart: cart::Model,
        item: order_item::Model,
    ) -> AppResult<(cart::Model, order_item::Model)> {
        let txn = self.db.begin().await.map_err(AppError::DbError)?;
        let res = Self::save_cart_with_item_internal(&txn, cart, item).await;
        match res {
            Ok(saved) => {
                txn.commit().await.map_err(AppError::DbError)?;
                Ok(saved)
            }
            Err(err) => {
                txn.rollback().await.map_err(AppError::DbError)?;
                Err(err)
            }
        }
    }

    async fn delete_cart(&self, cart_id: i32) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(AppError::DbError)?;

        order_item::Entity::update_many()
            .col_expr(order_item::Column::CartId, Expr::value(Value::Int(None)))
            .filter(order_item::Column::CartId.eq(cart_id))
            .exec(&txn)
            .await
            .map_err(AppError::DbError)?;

        cart::Entity::delete_by_id(cart_id)
            .exec(&txn)
            .await
            .map_err(AppError::DbError)?;

        txn.commit().await.map_err(AppError::DbError)
    }

    async fn remove_item(&self, item_id: i32) -> AppResult<()> {
        order_item::Entity::delete_by_id(item_id)
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::DbError)?;
        Ok(())
    }

    async fn find_items_by_order(&self, order_id: i32) -> AppResult<Vec<order_item::Model>> {
        order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .filter(order_item::Column::Deleted.eq(false))
            .order_by_asc(order_item::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }
}

impl PostgresCartRepository {
    async fn save_cart_with_item_internal<C>(
        db: &C,
        cart: cart::Model,
        item: order_item::Model,
    ) -> AppResult<(cart::Model, order_item::Model)>
    where
        C: ConnectionTrait,
    {
        let saved_cart = cart
            .into_active_model()
            .reset_all()
            .update(db)
            .await
            .map_err(AppError::DbError)?;

        let saved_item = if item.id == 0 {
            let mut active = item.into_active_model();
            active.id = NotSet;
            active.insert(db).await.map_err(AppError::DbError)?
        } else {
            item.into_active_model()
                .reset_all()
                .update(db)
                .await
                .map_err(AppError::DbError)?
        };

        Ok((saved_cart, saved_item))
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone)]
pub struct InMemoryCartRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryCartRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> AppResult<Option<(cart::Model, Vec<order_item::Model>)>> {
        let carts = self.store.carts.lock().unwrap();
        let cart = carts
            .values()
            .find(|c| c.user_id == user_id && !c.deleted)
            .cloned();
        drop(carts);

        match cart {
            Some(cart) => {
                let items = self.store.order_items.lock().unwrap();
                let mut found: Vec<_> = items
                    .values()
                    .filter(|i| i.cart_id == Some(cart.id) && !i.deleted)
                    .cloned()
                    .collect();
                found.sort_by_key(|i| i.id);
                Ok(Some((cart, found)))
            }
            None => Ok(None),
        }
    }

    async fn insert_cart(&self, mut cart: cart::Model) -> AppResult<cart::Model> {
        cart.id = self.store.next_id();
        let mut carts = self.store.carts.lock().unwrap();
        carts.insert(cart.id, cart.clone());
        Ok(cart)
    }

    async fn save_cart_with_item(
        &self,
        cart: cart::Model,
        mut item: order_item::Model,
    ) -> AppResult<(cart::Model, order_item::Model)> {
        if item.id == 0 {
            item.id = self.store.next_id();
        }
        self.store
            .carts
            .lock()
            .unwrap()
            .insert(cart.id, cart.clone());
        self.store
            .order_items
            .lock()
            .unwrap()
            .insert(item.id, item.clone());
        Ok((cart, item))
    }

    async fn delete_cart(&self, cart_id: i32) -> AppResult<()> {
        let mut items = self.store.order_items.lock().unwrap();
        for item in items.values_mut() {
            if item.cart_id == Some(cart_id) {
                item.cart_id = None;
            }
        }
        drop(items);
        self.store.carts.lock().unwrap().remove(&cart_id);
        Ok(())
    }

    async fn remove_item(&self, item_id: i32) -> AppResult<()> {
        self.store.order_items.lock().unwrap().remove(&item_id);
        Ok(())
    }

    async fn find_items_by_order(&self, order_id: i32) -> AppResult<Vec<order_item::Model>> {
        let items = self.store.order_items.lock().unwrap();
        let mut found: Vec<_> = items
            .values()
            .filter(|i| i.order_id == Some(order_id) && !i.deleted)
            .cloned()
            .collect();
        found.sort_by_key(|i| i.id);
        Ok(found)
    }
}
