use axum::{routing::get, Router};

use crate::modules::{addresses, auth, cart, catalog, orders, reviews, users};
use crate::shared::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let v1 = Router::new()
        .nest("/auth", auth::router::router())
        .nest("/users", users::router::router())
        .nest("/categories", catalog::router::categories_router())
        .nest("/products", catalog::router::products_router())
        .nest("/addresses", addresses::router::router())
        .nest("/carts", cart::router::router())
        .nest("/orders", orders::router::router())
        .nest("/reviews", reviews::router::router());

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/v1", v1)
        .with_state(state)
}
