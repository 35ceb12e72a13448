use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::orders::handlers;
use crate::shared::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_order).get(handlers::list_orders))
        .route(
            "/:id",
            get(handlers::get_order).delete(handlers::cancel_order),
        )
        .route("/:id/payments", post(handlers::create_payment))
        .route(
            "/:id/shipment",
            get(handlers::get_shipment).delete(handlers::cancel_shipment),
        )
}
