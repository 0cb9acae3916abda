use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use bhatti_core::domain::{MenuItem, MenuItemPatch, NewMenuItem};

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::handlers::{IdPayload, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MenuUpdate {
    pub id: Option<String>,
    #[serde(flatten)]
    pub patch: MenuItemPatch,
}

/// GET /api/admin/menu
pub async fn list_menu(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu_service.list_all().await?))
}

/// POST /api/admin/menu
pub async fn create_menu_item(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    payload: Result<Json<NewMenuItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    let Json(input) = payload?;
    let item = state.menu_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/admin/menu
pub async fn update_menu_item(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    payload: Result<Json<MenuUpdate>, JsonRejection>,
) -> ApiResult<Json<MenuItem>> {
    let Json(MenuUpdate { id, patch }) = payload?;
    Ok(Json(state.menu_service.update(id.as_deref(), patch).await?))
}

/// DELETE /api/admin/menu
pub async fn delete_menu_item(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    payload: Result<Json<IdPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(IdPayload { id }) = payload?;
    state.menu_service.delete(id.as_deref()).await?;
    Ok(Json(MessageResponse::new("Menu item deleted")))
}
