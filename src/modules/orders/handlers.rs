use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::modules::auth::permissions::Action;
use crate::modules::auth::service::Claims;
use crate::modules::catalog::handlers::PageParams;
use crate::modules::orders::dtos::{OrderDto, ShipmentDto};
use crate::modules::payments::service::CreatePaymentRequest;
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

pub async fn create_order(
    State(state): State<AppState>,
    claims: Claims,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    claims.authorize(Action::PlaceOrder)?;
    let user_id = resolve_user_id(&state, &claims).await?;
    let order = state.orders.create_order(&claims.sub, user_id).await?;
    Ok(Json(ApiResponse::created("order created", order)))
}

pub async fn list_orders(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ApiResponse<Vec<OrderDto>>>> {
    let user_id = resolve_user_id(&state, &claims).await?;
    let orders = state
        .orders
        .get_orders_by_user(user_id, params.page, params.per_page)
        .await?;
    Ok(Json(ApiResponse::ok("orders fetched", orders)))
}

pub async fn get_order(
    State(state): State<AppState>,
    claims: Claims,
    Path(order_id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    let user_id = resolve_user_id(&state, &claims).await?;
    let order = state.orders.get_order(user_id, order_id).await?;
    Ok(Json(ApiResponse::ok("order fetched", order)))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    claims: Claims,
    Path(order_id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    let user_id = resolve_user_id(&state, &claims).await?;
    let order = state
        .orders
        .cancel_order(&claims.sub, user_id, order_id)
        .await?;
    Ok(Json(ApiResponse::ok("order cancelled", order)))
}

pub async fn create_payment(
    State(state): State<AppState>,
    claims: Claims,
    Path(order_id): Path<i32>,
    Json(body): Json<CreatePaymentRequest>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    claims.authorize(Action::PlaceOrder)?;
    let user_id = resolve_user_id(&state, &claims).await?;
    let order = state
        .payments
        .create_payment(&claims.sub, user_id, order_id, body)
        .await?;
    Ok(Json(ApiResponse::created("payment recorded", order)))
}

pub async fn get_shipment(
    State(state): State<AppState>,
    claims: Claims,
    Path(order_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ShipmentDto>>> {
    let user_id = resolve_user_id(&state, &claims).await?;
    let shipment = state.shipments.get_shipment(user_id, order_id).await?;
    Ok(Json(ApiResponse::ok("shipment fetched", shipment)))
}

pub async fn cancel_shipment(
    State(state): State<AppState>,
    claims: Claims,
    Path(order_id): Path<i32>,
) -> AppResult<Json<ApiResponse<ShipmentDto>>> {
    let user_id = resolve_user_id(&state, &claims).await?;
    let shipment = state
        .shipments
        .cancel_shipment(&claims.sub, user_id, order_id)
        .await?;
    Ok(Json(ApiResponse::ok("shipment cancelled", shipment)))
}
