use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use bhatti_core::domain::{AddressBookView, AddressPatch, NewAddress, ProfileUpdate, ProfileView};

use super::IdPayload;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> ApiResult<Json<ProfileView>> {
    Ok(Json(state.profile_service.get(&principal).await?))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Json<ProfileView>> {
    let Json(update) = payload?;
    Ok(Json(state.profile_service.update(&principal, update).await?))
}

/// POST /api/profile/addresses
pub async fn add_address(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    payload: Result<Json<NewAddress>, JsonRejection>,
) -> ApiResult<Json<AddressBookView>> {
    let Json(input) = payload?;
    Ok(Json(state.profile_service.add_address(&principal, input).await?))
}

/// PATCH /api/profile/addresses
pub async fn update_address(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    payload: Result<Json<AddressPatch>, JsonRejection>,
) -> ApiResult<Json<AddressBookView>> {
    let Json(patch) = payload?;
    Ok(Json(state.profile_service.update_address(&principal, patch).await?))
}

/// DELETE /api/profile/addresses
pub async fn remove_address(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    payload: Result<Json<IdPayload>, JsonRejection>,
) -> ApiResult<Json<AddressBookView>> {
    let Json(IdPayload { id }) = payload?;
    Ok(Json(
        state.profile_service.remove_address(&principal, id.as_deref()).await?,
    ))
}
