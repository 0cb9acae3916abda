use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use bhatti_core::domain::{CustomerOrderView, PlaceOrder};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/orders
pub async fn list_my_orders(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> ApiResult<Json<Vec<CustomerOrderView>>> {
    let orders = state.order_service.list_for_customer(&principal).await?;
    Ok(Json(orders.iter().map(|o| o.customer_view()).collect()))
}

/// POST /api/orders
pub async fn place_order(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    payload: Result<Json<PlaceOrder>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CustomerOrderView>)> {
    let Json(request) = payload?;
    let order = state.order_service.place_order(&principal, request).await?;
    Ok((StatusCode::CREATED, Json(order.customer_view())))
}
