use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
    pub html: String,
    pub changed: bool,
}

/// Link term occurrences in an HTML fragment.
pub async fn render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Json<RenderResponse> {
    let html = state.registry.rewrite_html(&request.html);
    Json(RenderResponse {
        changed: html != request.html,
        html,
    })
}
