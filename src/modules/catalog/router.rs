use axum::{
    routing::{get, put},
    Router,
};

use crate::modules::catalog::handlers;
use crate::shared::state::AppState;

pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:id",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .route(
            "/:id/subcategories",
            get(handlers::list_sub_categories).post(handlers::create_sub_category),
        )
}

pub fn products_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/:id/reviews",
            get(crate::modules::reviews::handlers::list_reviews)
                .post(crate::modules::reviews::handlers::create_review),
        )
}
