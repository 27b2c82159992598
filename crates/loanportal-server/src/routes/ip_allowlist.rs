//! IP allow-list routes: `/v1/environments/{env}/ip-allowlist/*`

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use loanportal_core::display;
use loanportal_core::models::IpAllowEntry;
use loanportal_core::ops::ip_allowlist;

use crate::error::AppError;
use crate::routes::{ActionResponse, parse_env};
use crate::state::AppState;

/// Build the `/v1/environments/{env}/ip-allowlist` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_entries).post(add_entry))
        .route("/{id}", delete(remove_entry))
}

#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub address: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct EntryView {
    #[serde(flatten)]
    pub entry: IpAllowEntry,
    pub added: String,
}

impl From<IpAllowEntry> for EntryView {
    fn from(entry: IpAllowEntry) -> Self {
        Self {
            added: display::format_date(Some(entry.created_at)),
            entry,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub entries: Vec<EntryView>,
}

async fn list_entries(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
) -> Result<Json<EntryListResponse>, AppError> {
    let tag = parse_env(&env)?;
    let portal = state.portal.lock().await;

    let entries = ip_allowlist::list(portal.registry(), tag)
        .iter()
        .cloned()
        .map(EntryView::from)
        .collect();

    Ok(Json(EntryListResponse { entries }))
}

async fn add_entry(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
    body: Result<Json<AddEntryRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<EntryView>>, AppError> {
    let tag = parse_env(&env)?;
    let Json(body) = body?;
    let mut portal = state.portal.lock().await;

    let added = portal.add_ip(tag, &body.address, &body.description);
    let notifications = portal.notifier().drain();
    let entry = added?;

    Ok(Json(ActionResponse {
        result: Some(entry.into()),
        notifications,
    }))
}

async fn remove_entry(
    State(state): State<Arc<AppState>>,
    Path((env, id)): Path<(String, String)>,
) -> Result<Json<ActionResponse<EntryView>>, AppError> {
    let tag = parse_env(&env)?;
    let mut portal = state.portal.lock().await;

    let removed = portal.remove_ip(tag, &id);

    Ok(Json(ActionResponse {
        result: removed.map(EntryView::from),
        notifications: portal.notifier().drain(),
    }))
}
