//! API key routes: `/v1/environments/{env}/keys/*` and `/v1/keys/new/*`.
//!
//! A generated or rotated secret appears once, in the response to the
//! action that created it. Afterwards only the redacted prefix is served.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use loanportal_core::display;
use loanportal_core::models::ApiKeyRecord;
use loanportal_core::ops::api_keys::{self, GeneratedKey};

use crate::error::AppError;
use crate::routes::{ActionResponse, parse_env};
use crate::state::AppState;

/// Build the `/v1/environments/{env}/keys` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_keys).post(generate_key))
        .route("/{id}", delete(revoke_key))
        .route("/{id}/rotate", post(rotate_key))
}

/// Build the `/v1/keys/new` router for the on-display secret.
pub fn new_key_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/copy", post(copy_new_key))
        .route("/dismiss", post(dismiss_new_key))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateKeyRequest {
    pub name: String,
}

/// A stored key with its dates formatted for display.
#[derive(Debug, Serialize)]
pub struct KeyView {
    #[serde(flatten)]
    pub key: ApiKeyRecord,
    pub created: String,
    pub last_used: String,
}

impl From<ApiKeyRecord> for KeyView {
    fn from(key: ApiKeyRecord) -> Self {
        Self {
            created: display::format_date(Some(key.created_at)),
            last_used: display::format_date(key.last_used_at),
            key,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct KeyListResponse {
    pub keys: Vec<KeyView>,
}

/// A key together with its one-time secret.
#[derive(Debug, Serialize)]
pub struct IssuedKey {
    pub key: KeyView,
    pub secret: String,
}

impl From<GeneratedKey> for IssuedKey {
    fn from(generated: GeneratedKey) -> Self {
        Self {
            secret: generated.secret.expose().to_owned(),
            key: generated.record.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub copied: bool,
    pub notifications: Vec<loanportal_core::notify::Notification>,
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn list_keys(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
) -> Result<Json<KeyListResponse>, AppError> {
    let tag = parse_env(&env)?;
    let portal = state.portal.lock().await;

    let keys = api_keys::list(portal.registry(), tag)
        .iter()
        .cloned()
        .map(KeyView::from)
        .collect();

    Ok(Json(KeyListResponse { keys }))
}

async fn generate_key(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
    body: Result<Json<GenerateKeyRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<IssuedKey>>, AppError> {
    let tag = parse_env(&env)?;
    let Json(body) = body?;
    let mut portal = state.portal.lock().await;

    let generated = portal.generate_key(tag, &body.name);
    let notifications = portal.notifier().drain();
    let generated = generated?;

    Ok(Json(ActionResponse {
        result: Some(generated.into()),
        notifications,
    }))
}

async fn revoke_key(
    State(state): State<Arc<AppState>>,
    Path((env, id)): Path<(String, String)>,
) -> Result<Json<ActionResponse<KeyView>>, AppError> {
    let tag = parse_env(&env)?;
    let mut portal = state.portal.lock().await;

    let removed = portal.revoke_key(tag, &id);

    Ok(Json(ActionResponse {
        result: removed.map(KeyView::from),
        notifications: portal.notifier().drain(),
    }))
}

async fn rotate_key(
    State(state): State<Arc<AppState>>,
    Path((env, id)): Path<(String, String)>,
) -> Result<Json<ActionResponse<IssuedKey>>, AppError> {
    let tag = parse_env(&env)?;
    let mut portal = state.portal.lock().await;

    let rotated = portal.rotate_key(tag, &id);

    Ok(Json(ActionResponse {
        result: rotated.map(IssuedKey::from),
        notifications: portal.notifier().drain(),
    }))
}

async fn copy_new_key(State(state): State<Arc<AppState>>) -> Json<CopyResponse> {
    let portal = state.portal.lock().await;
    let copied = portal.copy_new_key();

    Json(CopyResponse {
        copied,
        notifications: portal.notifier().drain(),
    })
}

async fn dismiss_new_key(State(state): State<Arc<AppState>>) -> Json<ActionResponse<()>> {
    let mut portal = state.portal.lock().await;
    portal.dismiss_new_key();

    Json(ActionResponse {
        result: None,
        notifications: portal.notifier().drain(),
    })
}
