use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use bhatti_core::services::PurgeReport;

use crate::error::ApiResult;
use crate::extractors::AdminUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PurgeQuery {
    pub collection: Option<String>,
    pub confirm: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CollectionStats {
    pub collections: BTreeMap<String, i64>,
    pub message: String,
}

/// GET /api/admin/cleanup
pub async fn stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Json<CollectionStats> {
    Json(CollectionStats {
        collections: state.cleanup_service.stats().await,
        message: "Use DELETE /api/admin/cleanup?collection=<name>&confirm=true to delete a collection"
            .to_string(),
    })
}

/// DELETE /api/admin/cleanup?collection=X&confirm=true
pub async fn purge(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(query): Query<PurgeQuery>,
) -> ApiResult<Json<PurgeReport>> {
    let report = state
        .cleanup_service
        .purge(query.collection.as_deref(), query.confirm.as_deref())
        .await?;
    tracing::info!("Admin {} purged '{}' ({} documents)", admin.uid, report.collection, report.deleted);
    Ok(Json(report))
}
