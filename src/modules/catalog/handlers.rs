use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::modules::auth::permissions::Action;
use crate::modules::auth::service::Claims;
use crate::modules::catalog::entities::{category, product, sub_category};
use crate::shared::{
    error::AppResult,
    response::ApiResponse,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub sub_category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub available_stock: i32,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_per_page() -> u64 {
    20
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<category::Model>>>> {
    let categories = state.catalog.list_categories().await?;
    Ok(Json(ApiResponse::ok("categories fetched", categories)))
}

pub async fn create_category(
    State(state): State<AppState>,
    claims: Claims,
    Json(body): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<category::Model>>> {
    claims.authorize(Action::ManageCatalog)?;
    let created = state
        .catalog
        .create_category(&claims.sub, body.name, body.description)
        .await?;
    Ok(Json(ApiResponse::created("category created", created)))
}

pub async fn update_category(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(body): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<category::Model>>> {
    claims.authorize(Action::ManageCatalog)?;
    let updated = state
        .catalog
        .update_category(&claims.sub, id, body.name, body.description)
        .await?;
    Ok(Json(ApiResponse::ok("category updated", updated)))
}

pub async fn delete_category(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    claims.authorize(Action::ManageCatalog)?;
    state.catalog.delete_category(&claims.sub, id).await?;
    Ok(Json(ApiResponse::message("category deleted")))
}

pub async fn list_sub_categories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<sub_category::Model>>>> {
    let subs = state.catalog.list_sub_categories(id).await?;
    Ok(Json(ApiResponse::ok("sub-categories fetched", subs)))
}

pub async fn create_sub_category(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(body): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<sub_category::Model>>> {
    claims.authorize(Action::ManageCatalog)?;
    let created = state
        .catalog
        .create_sub_category(&claims.sub, id, body.name, body.description)
        .await?;
    Ok(Json(ApiResponse::created("sub-category created", created)))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ApiResponse<Vec<product::Model>>>> {
    let products = state
        .catalog
        .list_products(params.page, params.per_page)
        .await?;
    Ok(Json(ApiResponse::ok("products fetched", products)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<product::Model>>> {
    let product = state.catalog.get_product(id).await?;
    Ok(Json(ApiResponse::ok("product fetched", product)))
}

pub async fn create_product(
    State(state): State<AppState>,
    claims: Claims,
    Json(body): Json<ProductRequest>,
) -> AppResult<Json<ApiResponse<product::Model>>> {
    claims.authorize(Action::ManageCatalog)?;
    let created = state
        .catalog
        .create_product(
            &claims.sub,
            body.sub_category_id,
            body.name,
            body.description,
            body.unit_price,
            body.available_stock,
        )
        .await?;
    Ok(Json(ApiResponse::created("product created", created)))
}

pub async fn update_product(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(body): Json<ProductRequest>,
) -> AppResult<Json<ApiResponse<product::Model>>> {
    claims.authorize(Action::ManageCatalog)?;
    let updated = state
        .catalog
        .update_product(
            &claims.sub,
            id,
            body.name,
            body.description,
            body.unit_price,
            body.available_stock,
        )
        .await?;
    Ok(Json(ApiResponse::ok("product updated", updated)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    claims.authorize(Action::ManageCatalog)?;
    state.catalog.delete_product(&claims.sub, id).await?;
    Ok(Json(ApiResponse::message("product deleted")))
}
