use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::modules::addresses::infra::persistence::{
    InMemoryAddressRepository, PostgresAddressRepository,
};
use crate::modules::addresses::repository::AddressRepository;
use crate::modules::cart::infra::persistence::{InMemoryCartRepository, PostgresCartRepository};
use crate::modules::cart::repository::CartRepository;
use crate::modules::catalog::infra::persistence::{
    InMemoryCategoryRepository, InMemoryProductRepository, PostgresCategoryRepository,
    PostgresProductRepository,
};
use crate::modules::catalog::repository::{CategoryRepository, ProductRepository};
use crate::modules::orders::infra::persistence::{
    InMemoryOrderRepository, PostgresOrderRepository,
};
use crate::modules::orders::repository::OrderRepository;
use crate::modules::payments::infra::persistence::{
    InMemoryPaymentRepository, PostgresPaymentRepository,
};
use crate::modules::payments::repository::PaymentRepository;
use crate::modules::reviews::infra::persistence::{
    InMemoryReviewRepository, PostgresReviewRepository,
};
use crate::modules::reviews::repository::ReviewRepository;
use crate::modules::shipments::infra::persistence::{
    InMemoryShipmentRepository, PostgresShipmentRepository,
};
use crate::modules::shipments::repository::ShipmentRepository;
use crate::modules::users::infra::persistence::{InMemoryUserRepository, PostgresUserRepository};
use crate::modules::users::repository::UserRepository;
use crate::shared::infra::memory::MemoryStore;

/// One repository per aggregate, all bound to the same backend.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub addresses: Arc<dyn AddressRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub shipments: Arc<dyn ShipmentRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    pub fn postgres(db: Arc<DatabaseConnection>) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            addresses: Arc::new(PostgresAddressRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            products: Arc::new(PostgresProductRepository::new(db.clone())),
            carts: Arc::new(PostgresCartRepository::new(db.clone())),
            orders: Arc::new(PostgresOrderRepository::new(db.clone())),
            payments: Arc::new(PostgresPaymentRepository::new(db.clone())),
            shipments: Arc::new(PostgresShipmentRepository::new(db.clone())),
            reviews: Arc::new(PostgresReviewRepository::new(db)),
        }
    }

    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            addresses: Arc::new(InMemoryAddressRepository::new(store.clone())),
            categories: Arc::new(InMemoryCategoryRepository::new(store.clone())),
            products: Arc::new(InMemoryProductRepository::new(store.clone())),
            carts: Arc::new(InMemoryCartRepository::new(store.clone())),
            orders: Arc::new(InMemoryOrderRepository::new(store.clone())),
            payments: Arc::new(InMemoryPaymentRepository::new(store.clone())),
            shipments: Arc::new(InMemoryShipmentRepository::new(store.clone())),
            reviews: Arc::new(InMemoryReviewRepository::new(store)),
        }
    }
}
