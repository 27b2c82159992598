//! Download routes: Postman collections, environment files, and client
//! libraries.
//!
//! Downloads only emit the notice; no file content is served.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use loanportal_core::catalog::{self, ApiClient, Collection, EnvironmentFile};

use crate::error::AppError;
use crate::routes::{ActionResponse, parse_env};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/collections", get(list_collections))
        .route("/v1/collections/{id}/download", post(download_collection))
        .route("/v1/environment-files", get(list_environment_files))
        .route("/v1/environment-files/{env}/download", post(download_environment_file))
        .route("/v1/clients", get(list_clients))
}

#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    pub env: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CollectionListResponse {
    pub collections: Vec<&'static Collection>,
}

#[derive(Debug, Serialize)]
pub struct EnvironmentFileListResponse {
    pub files: &'static [EnvironmentFile],
}

#[derive(Debug, Serialize)]
pub struct ClientListResponse {
    pub clients: &'static [ApiClient],
}

/// Every collection, or those published for `?env=`.
async fn list_collections(
    Query(query): Query<CollectionQuery>,
) -> Result<Json<CollectionListResponse>, AppError> {
    let collections = match query.env.as_deref() {
        Some(env) => catalog::collections_for(parse_env(env)?),
        None => catalog::collections().iter().collect(),
    };

    Ok(Json(CollectionListResponse { collections }))
}

async fn download_collection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActionResponse<&'static Collection>>, AppError> {
    let portal = state.portal.lock().await;

    let downloaded = portal.download_collection(&id);
    let notifications = portal.notifier().drain();
    let collection = downloaded?;

    Ok(Json(ActionResponse {
        result: Some(collection),
        notifications,
    }))
}

async fn list_environment_files() -> Json<EnvironmentFileListResponse> {
    Json(EnvironmentFileListResponse {
        files: catalog::environment_files(),
    })
}

async fn download_environment_file(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
) -> Result<Json<ActionResponse<&'static EnvironmentFile>>, AppError> {
    let tag = parse_env(&env)?;
    let portal = state.portal.lock().await;

    let downloaded = portal.download_environment_file(tag);
    let notifications = portal.notifier().drain();
    let file = downloaded?;

    Ok(Json(ActionResponse {
        result: Some(file),
        notifications,
    }))
}

async fn list_clients() -> Json<ClientListResponse> {
    Json(ClientListResponse {
        clients: catalog::api_clients(),
    })
}
