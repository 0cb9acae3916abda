use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub value: u64,
}

/// POST /api/metrics/visit
pub async fn record_visit(State(state): State<AppState>) -> ApiResult<Json<VisitResponse>> {
    if state.visit_limiter.check().is_err() {
        return Err(ApiError::TooManyRequests);
    }
    let value = state.metrics_service.record_visit().await?;
    Ok(Json(VisitResponse { value }))
}
