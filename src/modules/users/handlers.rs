use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::modules::auth::permissions::Action;
use crate::modules::auth::service::Claims;
use crate::modules::users::entities::{enums::Role, user};
use crate::shared::{
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub uuid: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            uuid: user.uuid,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub async fn get_me(
    State(state): State<AppState>,
    claims: Claims,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_repo
        .find_by_uuid(&claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok("user fetched", user.into())))
}

pub async fn get_user(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    claims.authorize(Action::ViewAnyUser)?;

    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::ok("user fetched", user.into())))
}
