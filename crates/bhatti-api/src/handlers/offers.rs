use axum::{extract::State, Json};
use chrono::Utc;

use bhatti_core::domain::Offer;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/offers
pub async fn list_live_offers(State(state): State<AppState>) -> ApiResult<Json<Vec<Offer>>> {
    let offers = state.offer_service.list_live(Utc::now()).await?;
    Ok(Json(offers))
}
