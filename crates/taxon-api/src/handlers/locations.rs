//! Index maintenance for content locations.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use taxon_index::{ContentItem, IndexOutcome};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexLocationResponse {
    pub location: String,
    pub outcomes: Vec<IndexOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeindexLocationResponse {
    pub location: String,
    pub removed: u64,
}

/// Reindex one content item under every taxonomy.
pub async fn index_location(
    State(state): State<AppState>,
    Json(item): Json<ContentItem>,
) -> Result<Json<IndexLocationResponse>, ApiError> {
    if item.location.trim().is_empty() {
        return Err(ApiError::BadRequest("location cannot be empty".to_string()));
    }
    let outcomes = state.registry.index_location(&item).await?;
    Ok(Json(IndexLocationResponse {
        location: item.location,
        outcomes,
    }))
}

/// Drop a content location from every taxonomy.
pub async fn deindex_location(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<DeindexLocationResponse>, ApiError> {
    if query.location.trim().is_empty() {
        return Err(ApiError::BadRequest("location cannot be empty".to_string()));
    }
    let removed = state.registry.deindex_location(&query.location).await?;
    info!(
        subsystem = "api",
        op = "deindex_location",
        location = %query.location,
        removed,
        "Deindexed location"
    );
    Ok(Json(DeindexLocationResponse {
        location: query.location,
        removed,
    }))
}
