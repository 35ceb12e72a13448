use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

use crate::modules::cart::entities::{cart, order_item};
use crate::modules::orders::entities::order;
use crate::modules::orders::repository::OrderRepository;
use crate::modules::payments::entities::payment;
use crate::modules::shipments::entities::{shipment, shipment_tracking};
use crate::shared::error::{AppError, AppResult};
use crate::shared::infra::memory::MemoryStore;

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct PostgresOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn insert_from_cart(
        &self,
        order: order::Model,
        item_ids: Vec<i32>,
    ) -> AppResult<order::Model> {
        let txn = self.db.begin().await.map_err(AppError::DbError)?;

        let mut active = order.into_active_model();
        active.id = NotSet;
        let created = active.insert(&txn).await.map_err(AppError::DbError)?;

        if !item_ids.is_empty() {
            order_item::Entity::update_many()
                .col_expr(order_item::Column::OrderId, Expr::value(created.id))
                .col_expr(order_item::Column::CartId, Expr::value(Value::Int(None)))
                .filter(order_item::Column::Id.is_in(item_ids))
                .exec(&txn)
                .await
                .map_err(AppError::DbError)?;
        }

        txn.commit().await.map_err(AppError::DbError)?;
        Ok(created)
    }

    async fn find_by_id_and_user(
        &self,
        order_id: i32,
        user_id: i32,
    ) -> AppResult<Option<order::Model>> {
        order::Entity::find_by_id(order_id)
            .filter(order::Column::UserId.eq(user_id))
            .filter(order::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_page_by_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> AppResult<Vec<order::Model>> {
        order::Entity::find()
            .filter(order::Column::UserId.eq(user_id))
            .filter(order::Column::Deleted.eq(false))
            .order_by_desc(order::Column::Id)
            .paginate(self.db.as_ref(), per_page)
            .fetch_page(page)
            .await
            .map_err(AppError::DbError)
    }

    async fn update(&self, order: order::Model) -> AppResult<order::Model> {
        order
            .into_active_model()
            .reset_all()
            .update(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn complete_payment(
        &self,
        order: order::Model,
        payment: payment::Model,
        shipment: shipment::Model,
        tracking: shipment_tracking::Model,
        cart_id: Option<i32>,
    ) -> AppResult<(order::Model, payment::Model, shipment::Model)> {
        let txn = self.db.begin().await.map_err(AppError::DbError)?;
        let res =
            Self::complete_payment_internal(&txn, order, payment, shipment, tracking, cart_id)
                .await;
        match res {
            Ok(done) => {
                txn.commit().await.map_err(AppError::DbError)?;
                Ok(done)
            }
            Err(err) => {
                txn.rollback().await.map_err(AppError::DbError)?;
                Err(err)
            }
        }
    }
}

impl PostgresOrderRepository {
    async fn complete_payment_internal<C>(
        db: &C,
        order: order::Model,
        payment: payment::Model,
        shipment: shipment::Model,
        mut tracking: shipment_tracking::Model,
        cart_id: Option<i32>,
    ) -> AppResult<(order::Model, payment::Model, shipment::Model)>
    where
        C: ConnectionTrait,
    {
        let mut active = payment.into_active_model();
        active.id = NotSet;
        let saved_payment = active.insert(db).await.map_err(AppError::DbError)?;

        let mut active = shipment.into_active_model();
        active.id = NotSet;
        let saved_shipment = active.insert(db).await.map_err(AppError::DbError)?;

        tracking.shipment_id = saved_shipment.id;
        let mut active = tracking.into_active_model();
        active.id = NotSet;
        active.insert(db).await.map_err(AppError::DbError)?;

        let saved_order = order
            .into_active_model()
            .reset_all()
            .update(db)
            .await
            .map_err(AppError::DbError)?;

        if let Some(cart_id) = cart_id {
            order_item::Entity::update_many()
                .col_expr(order_item::Column::CartId, Expr::value(Value::Int(None)))
                .filter(order_item::Column::CartId.eq(cart_id))
                .exec(db)
                .await
                .map_err(AppError::DbError)?;

            cart::Entity::delete_by_id(cart_id)
                .exec(db)
                .await
                .map_err(AppError::DbError)?;
        }

        Ok((saved_order, saved_payment, saved_shipment))
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone)]
pub struct InMemoryOrderRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryOrderRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert_from_cart(
        &self,
        mut order: order::Model,
        item_ids: Vec<i32>,
    ) -> AppResult<order::Model> {
        order.id = self.store.next_id();
        self.store
            .orders
            .lock()
            .unwrap()
            .insert(order.id, order.clone());

        let mut items = self.store.order_items.lock().unwrap();
        for id in item_ids {
            if let Some(item) = items.get_mut(&id) {
                item.order_id = Some(order.id);
                item.cart_id = None;
            }
        }

        Ok(order)
    }

    async fn find_by_id_and_user(
        &self,
        order_id: i32,
        user_id: i32,
    ) -> AppResult<Option<order::Model>> {
        let orders = self.store.orders.lock().unwrap();
        Ok(orders
            .get(&order_id)
            .filter(|o| o.user_id == user_id && !o.deleted)
            .cloned())
    }

    async fn find_page_by_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> AppResult<Vec<order::Model>> {
        let orders = self.store.orders.lock().unwrap();
        let mut found: Vec<_> = orders
            .values()
            .filter(|o| o.user_id == user_id && !o.deleted)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found
            .into_iter()
            .skip((page * per_page) as usize)
            .take(per_page as usize)
            .collect())
    }

    async fn update(&self, order: order::Model) -> AppResult<order::Model> {
        let mut orders = self.store.orders.lock().unwrap();
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn complete_payment(
        &self,
        order: order::Model,
        mut payment: payment::Model,
        mut shipment: shipment::Model,
        mut tracking: shipment_tracking::Model,
        cart_id: Option<i32>,
    ) -> AppResult<(order::Model, payment::Model, shipment::Model)> {
        payment.id = self.store.next_id();
        self.store
            .payments
            .lock()
            .unwrap()
            .insert(payment.id, payment.clone());

        shipment.id = self.store.next_id();
        self.store
            .shipments
            .lock()
            .unwrap()
            .insert(shipment.id, shipment.clone());

        tracking.id = self.store.next_id();
        tracking.shipment_id = shipment.id;
        self.store
            .shipment_trackings
            .lock()
            .unwrap()
            .insert(tracking.id, tracking);

        self.store
            .orders
            .lock()
            .unwrap()
            .insert(order.id, order.clone());

        if let Some(cart_id) = cart_id {
            let mut items = self.store.order_items.lock().unwrap();
            for item in items.values_mut() {
                if item.cart_id == Some(cart_id) {
                    item.cart_id = None;
                }
            }
            drop(items);
            self.store.carts.lock().unwrap().remove(&cart_id);
        }

        Ok((order, payment, shipment))
    }
}
