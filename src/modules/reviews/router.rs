use axum::{routing::put, Router};

use crate::modules::reviews::handlers;
use crate::shared::state::AppState;

/// Listing and creation are nested under the product routes; this router
/// only covers operations addressed by review id.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/:id",
        put(handlers::update_review).delete(handlers::delete_review),
    )
}
