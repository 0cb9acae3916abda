use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;

use bhatti_core::domain::AdminOrderView;

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusUpdate {
    pub id: Option<String>,
    pub status: Option<String>,
}

/// GET /api/admin/orders?limit=N
pub async fn list_orders(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<Json<Vec<AdminOrderView>>> {
    // Non-numeric limits are ignored, like a missing one.
    let limit = query.limit.as_deref().and_then(|l| l.trim().parse::<i64>().ok());
    let orders = state.order_service.list_for_admin(limit).await?;
    Ok(Json(orders.iter().map(|o| o.admin_view()).collect()))
}

/// PATCH /api/admin/orders
pub async fn update_status(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Json<AdminOrderView>> {
    let Json(update) = payload?;
    let order = state
        .order_service
        .update_status(update.id.as_deref(), update.status.as_deref())
        .await?;
    Ok(Json(order.admin_view()))
}
