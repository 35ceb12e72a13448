use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::modules::auth::service::AuthService;
use crate::modules::users::entities::{enums::Role, user};
use crate::shared::{
    audit,
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<TokenResponse>>> {
    if body.username.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "username, email and password are required".to_string(),
        ));
    }

    if state.user_repo.find_by_email(&body.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let uuid = uuid::Uuid::new_v4().to_string();
    let stamp = audit::stamp(&uuid);

    let user = state
        .user_repo
        .insert(user::Model {
            id: 0,
            uuid: uuid.clone(),
            username: body.username,
            email: body.email,
            password_hash: AuthService::hash_password(&body.password)?,
            role: Role::User,
            created_at: stamp.at,
            created_by: stamp.by.clone(),
            updated_at: stamp.at,
            updated_by: stamp.by,
            deleted: false,
        })
        .await?;

    tracing::info!(user = %user.uuid, "registered new user");

    let token = AuthService::generate_jwt(&state.config, &user.uuid, user.role)?;
    Ok(Json(ApiResponse::created(
        "user registered",
        TokenResponse { token },
    )))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<TokenResponse>>> {
    let user = state
        .user_repo
        .find_by_email(&body.email)
        .await?
        .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;

    AuthService::verify_password(&body.password, &user.password_hash)?;

    let token = AuthService::generate_jwt(&state.config, &user.uuid, user.role)?;
    Ok(Json(ApiResponse::ok("login ok", TokenResponse { token })))
}
