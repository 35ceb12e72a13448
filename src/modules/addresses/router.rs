use axum::{routing::get, Router};

use crate::modules::addresses::handlers;
use crate::shared::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::get_address).post(handlers::upsert_address),
    )
}
