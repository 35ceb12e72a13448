pub mod database;
pub mod repositories;

use std::sync::Arc;

use crate::modules::cart::service::CartService;
use crate::modules::catalog::service::CatalogService;
use crate::modules::orders::service::OrderService;
use crate::modules::payments::service::PaymentService;
use crate::modules::reviews::service::ReviewService;
use crate::modules::shipments::service::ShipmentService;
use crate::shared::{config::Config, infra::memory::MemoryStore, state::AppState};

pub async fn create_app_state(config: &Config) -> AppState {
    let repos = if config.app_env == "dev" {
        tracing::warn!("using in-memory repositories for dev env");
        repositories::Repositories::in_memory(Arc::new(MemoryStore::new()))
    } else {
        let db = Arc::new(database::connect_postgres(config).await);
        tracing::info!("connected to PostgreSQL");
        repositories::Repositories::postgres(db)
    };

    let catalog = Arc::new(CatalogService::new(
        repos.categories.clone(),
        repos.products.clone(),
    ));
    let carts = Arc::new(CartService::new(
        repos.carts.clone(),
        repos.products.clone(),
    ));
    let orders = Arc::new(OrderService::new(
        repos.orders.clone(),
        repos.carts.clone(),
        repos.addresses.clone(),
        repos.payments.clone(),
        repos.shipments.clone(),
    ));
    let payments = Arc::new(PaymentService::new(
        repos.payments.clone(),
        repos.orders.clone(),
        orders.clone(),
    ));
    let shipments = Arc::new(ShipmentService::new(
        repos.shipments.clone(),
        repos.orders.clone(),
    ));
    let reviews = Arc::new(ReviewService::new(
        repos.reviews.clone(),
        repos.products.clone(),
    ));

    AppState {
        config: Arc::new(config.clone()),
        user_repo: repos.users,
        address_repo: repos.addresses,
        catalog,
        carts,
        orders,
        payments,
        shipments,
        reviews,
    }
}
