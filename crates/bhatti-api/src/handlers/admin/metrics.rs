use axum::{extract::State, Json};

use bhatti_core::domain::{DashboardMetrics, UserInsights};

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// GET /api/admin/metrics
pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<DashboardMetrics>> {
    Ok(Json(state.metrics_service.dashboard().await?))
}

/// GET /api/admin/user-metrics
pub async fn user_insights(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<UserInsights>> {
    Ok(Json(state.metrics_service.user_insights().await?))
}
