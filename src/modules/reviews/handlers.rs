use axum::{
    extract::{Path, State},
    Json,
};

use crate::modules::auth::permissions::Action;
use crate::modules::auth::service::Claims;
use crate::modules::reviews::entities::review;
use crate::modules::reviews::service::ReviewRequest;
use crate::shared::{
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
};

async fn resolve_user_id(state: &AppState, claims: &Claims) -> AppResult<i32> {
    let user = state
        .user_repo
        .find_by_uuid(&claims.sub)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(user.id)
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<review::Model>>>> {
    let reviews = state.reviews.list_reviews(product_id).await?;
    Ok(Json(ApiResponse::ok("reviews fetched", reviews)))
}

pub async fn create_review(
    State(state): State<AppState>,
    claims: Claims,
    Path(product_id): Path<i32>,
    Json(body): Json<ReviewRequest>,
) -> AppResult<Json<ApiResponse<review::Model>>> {
    claims.authorize(Action::WriteReview)?;
    let user_id = resolve_user_id(&state, &claims).await?;
    let review = state
        .reviews
        .create_review(&claims.sub, user_id, product_id, body)
        .await?;
    Ok(Json(ApiResponse::created("review created", review)))
}

pub async fn update_review(
    State(state): State<AppState>,
    claims: Claims,
    Path(review_id): Path<i32>,
    Json(body): Json<ReviewRequest>,
) -> AppResult<Json<ApiResponse<review::Model>>> {
    claims.authorize(Action::WriteReview)?;
    let user_id = resolve_user_id(&state, &claims).await?;
    let review = state
        .reviews
        .update_review(&claims.sub, user_id, review_id, body)
        .await?;
    Ok(Json(ApiResponse::ok("review updated", review)))
}

pub async fn delete_review(
    State(state): State<AppState>,
    claims: Claims,
    Path(review_id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    claims.authorize(Action::WriteReview)?;
    let user_id = resolve_user_id(&state, &claims).await?;
    state
        .reviews
        .delete_review(&claims.sub, user_id, review_id)
        .await?;
    Ok(Json(ApiResponse::message("review deleted")))
}
