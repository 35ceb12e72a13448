use axum::{routing::get, Router};

use crate::modules::cart::handlers;
use crate::shared::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::get_cart)
            .put(handlers::add_to_cart)
            .delete(handlers::delete_cart),
    )
}
