//! Taxonomy namespace pages: index, term lists and term details.

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use taxon_index::{Lookup, Route};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Raw so that non-numeric values reach the resolver as not-found.
    pub page: Option<String>,
}

pub async fn namespace_page(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let route = state
        .registry
        .resolve(uri.path(), query.page.as_deref())
        .await?;

    match route {
        Route::Index(taxonomies) => {
            Ok(Json(serde_json::json!({ "taxonomies": taxonomies })).into_response())
        }
        Route::TermList(Lookup::Found(page)) => Ok(Json(page).into_response()),
        Route::TermDetail(Lookup::Found(page)) => Ok(Json(page).into_response()),
        Route::TermList(Lookup::NotFound) | Route::TermDetail(Lookup::NotFound) => {
            Err(ApiError::NotFound(format!("Page not found: {}", uri)))
        }
        Route::NoMatch => Err(ApiError::NotFound(format!(
            "No taxonomy at {}",
            uri.path()
        ))),
    }
}
