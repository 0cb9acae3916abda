use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use bhatti_core::domain::{MenuFilter, MenuItem};

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/menu
pub async fn list_menu(
    State(state): State<AppState>,
    filter: Result<Query<MenuFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    let Query(filter) = filter?;
    Ok(Json(state.menu_service.list_public(&filter).await))
}
