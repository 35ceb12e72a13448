use axum::{extract::State, Json};
use serde::Deserialize;

use crate::modules::addresses::entities::address;
use crate::modules::auth::service::Claims;
use crate::shared::{
    audit,
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

pub async fn get_address(
    State(state): State<AppState>,
    claims: Claims,
) -> AppResult<Json<ApiResponse<address::Model>>> {
    let user = state
        .user_repo
        .find_by_uuid(&claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;

    let address = state
        .address_repo
        .find_by_user(user.id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok("address fetched", address)))
}

/// Creates the caller's address, or replaces it if one already exists. Orders
/// snapshot whichever address is current at checkout time.
pub async fn upsert_address(
    State(state): State<AppState>,
    claims: Claims,
    Json(body): Json<AddressRequest>,
) -> AppResult<Json<ApiResponse<address::Model>>> {
    let user = state
        .user_repo
        .find_by_uuid(&claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;

    let stamp = audit::stamp(&claims.sub);
    let saved = match state.address_repo.find_by_user(user.id).await? {
        Some(mut existing) => {
            existing.street = body.street;
            existing.city = body.city;
            existing.state = body.state;
            existing.zip_code = body.zip_code;
            existing.country = body.country;
            existing.updated_at = stamp.at;
            existing.updated_by = stamp.by;
            state.address_repo.update(existing).await?
        }
        None => {
            state
                .address_repo
                .insert(address::Model {
                    id: 0,
                    user_id: user.id,
                    street: body.street,
                    city: body.city,
                    state: body.state,
                    zip_code: body.zip_code,
                    country: body.country,
                    created_at: stamp.at,
                    created_by: stamp.by.clone(),
                    updated_at: stamp.at,
                    updated_by: stamp.by,
                    deleted: false,
                })
                .await?
        }
    };

    Ok(Json(ApiResponse::ok("address saved", saved)))
}
