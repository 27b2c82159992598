//! Documentation routes: `/v1/docs/*`

use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use loanportal_core::catalog::{self, DocSection};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1/docs` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(search_sections))
        .route("/{id}", get(get_section))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SectionListResponse {
    pub sections: Vec<&'static DocSection>,
}

/// All sections, or those matching `?q=`.
async fn search_sections(Query(query): Query<SearchQuery>) -> Json<SectionListResponse> {
    Json(SectionListResponse {
        sections: catalog::search(&query.q),
    })
}

async fn get_section(Path(id): Path<String>) -> Result<Json<&'static DocSection>, AppError> {
    Ok(Json(catalog::section(&id)?))
}
