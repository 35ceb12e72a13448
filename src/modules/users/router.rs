use axum::{routing::get, Router};

use crate::modules::users::handlers;
use crate::shared::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::get_me))
        .route("/:id", get(handlers::get_user))
}
