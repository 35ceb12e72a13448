use std::sync::Arc;

use axum::extract::FromRef;

use crate::modules::addresses::repository::AddressRepository;
use crate::modules::cart::service::CartService;
use crate::modules::catalog::service::CatalogService;
use crate::modules::orders::service::OrderService;
use crate::modules::payments::service::PaymentService;
use crate::modules::reviews::service::ReviewService;
use crate::modules::shipments::service::ShipmentService;
use crate::modules::users::repository::UserRepository;
use crate::shared::config::Config;

/// Shared handler state. Services own their repositories; the raw user and
/// address repositories are exposed directly because their handlers are thin
/// enough not to warrant a service layer.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub user_repo: Arc<dyn UserRepository>,
    pub address_repo: Arc<dyn AddressRepository>,
    pub catalog: Arc<CatalogService>,
    pub carts: Arc<CartService>,
    pub orders: Arc<OrderService>,
    pub payments: Arc<PaymentService>,
    pub shipments: Arc<ShipmentService>,
    pub reviews: Arc<ReviewService>,
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
