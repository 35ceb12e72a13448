use axum::{extract::State, Json};
use serde::Deserialize;

use crate::modules::auth::service::Claims;
use crate::modules::cart::dtos::CartDto;
use crate::modules::cart::service::AddItemRequest;
use crate::shared::{
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub items: Vec<AddItemRequest>,
}

async fn resolve_user_id(state: &AppState, claims: &Claims) -> AppResult<i32> {
    let user = state
        .user_repo
        .find_by_uuid(&claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(user.id)
}

pub async fn get_cart(
    State(state): State<AppState>,
    claims: Claims,
) -> AppResult<Json<ApiResponse<CartDto>>> {
    let user_id = resolve_user_id(&state, &claims).await?;
    let cart = state.carts.get_cart(user_id).await?;
    Ok(Json(ApiResponse::ok("cart fetched", cart)))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    claims: Claims,
    Json(body): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartDto>>> {
    if body.items.is_empty() {
        return Err(AppError::BadRequest("no items supplied".to_string()));
    }
    let user_id = resolve_user_id(&state, &claims).await?;
    let cart = state
        .carts
        .add_to_cart(&claims.sub, user_id, body.items)
        .await?;
    Ok(Json(ApiResponse::ok("cart updated", cart)))
}

pub async fn delete_cart(
    State(state): State<AppState>,
    claims: Claims,
) -> AppResult<Json<ApiResponse<()>>> {
    let user_id = resolve_user_id(&state, &claims).await?;
    state.carts.delete_cart(user_id).await?;
    Ok(Json(ApiResponse::message("cart deleted")))
}
