use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use bhatti_core::domain::{NewOffer, Offer, OfferPatch};

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::handlers::{IdPayload, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OfferUpdate {
    pub id: Option<String>,
    #[serde(flatten)]
    pub patch: OfferPatch,
}

/// GET /api/admin/offers
pub async fn list_offers(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<Vec<Offer>>> {
    Ok(Json(state.offer_service.list_all().await?))
}

/// POST /api/admin/offers
pub async fn create_offer(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    payload: Result<Json<NewOffer>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Offer>)> {
    let Json(input) = payload?;
    let offer = state.offer_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

/// PATCH /api/admin/offers
pub async fn update_offer(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    payload: Result<Json<OfferUpdate>, JsonRejection>,
) -> ApiResult<Json<Offer>> {
    let Json(OfferUpdate { id, patch }) = payload?;
    Ok(Json(state.offer_service.update(id.as_deref(), patch).await?))
}

/// DELETE /api/admin/offers
pub async fn delete_offer(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    payload: Result<Json<IdPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(IdPayload { id }) = payload?;
    state.offer_service.delete(id.as_deref()).await?;
    Ok(Json(MessageResponse::new("Offer deleted")))
}
