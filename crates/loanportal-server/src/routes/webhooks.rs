//! Webhook routes: `/v1/environments/{env}/webhooks/*`
//!
//! Events are submitted as one comma-separated string and stored as a list.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use loanportal_core::display;
use loanportal_core::models::WebhookRecord;
use loanportal_core::ops::webhooks;

use crate::error::AppError;
use crate::routes::{ActionResponse, parse_env};
use crate::state::AppState;

/// Build the `/v1/environments/{env}/webhooks` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_webhooks).post(add_webhook))
        .route("/{id}", delete(remove_webhook))
        .route("/{id}/toggle", post(toggle_webhook))
}

#[derive(Debug, Deserialize)]
pub struct AddWebhookRequest {
    pub url: String,
    /// Comma-separated event names.
    pub events: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookView {
    #[serde(flatten)]
    pub webhook: WebhookRecord,
    pub event_list: String,
    pub created: String,
}

impl From<WebhookRecord> for WebhookView {
    fn from(webhook: WebhookRecord) -> Self {
        Self {
            event_list: display::join_events(&webhook.events),
            created: display::format_date(Some(webhook.created_at)),
            webhook,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WebhookListResponse {
    pub webhooks: Vec<WebhookView>,
}

async fn list_webhooks(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
) -> Result<Json<WebhookListResponse>, AppError> {
    let tag = parse_env(&env)?;
    let portal = state.portal.lock().await;

    let webhooks = webhooks::list(portal.registry(), tag)
        .iter()
        .cloned()
        .map(WebhookView::from)
        .collect();

    Ok(Json(WebhookListResponse { webhooks }))
}

async fn add_webhook(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
    body: Result<Json<AddWebhookRequest>, JsonRejection>,
) -> Result<Json<ActionResponse<WebhookView>>, AppError> {
    let tag = parse_env(&env)?;
    let Json(body) = body?;
    let mut portal = state.portal.lock().await;

    let added = portal.add_webhook(tag, &body.url, &body.events);
    let notifications = portal.notifier().drain();
    let webhook = added?;

    Ok(Json(ActionResponse {
        result: Some(webhook.into()),
        notifications,
    }))
}

async fn toggle_webhook(
    State(state): State<Arc<AppState>>,
    Path((env, id)): Path<(String, String)>,
) -> Result<Json<ActionResponse<WebhookView>>, AppError> {
    let tag = parse_env(&env)?;
    let mut portal = state.portal.lock().await;

    let updated = portal.toggle_webhook(tag, &id);

    Ok(Json(ActionResponse {
        result: updated.map(WebhookView::from),
        notifications: portal.notifier().drain(),
    }))
}

async fn remove_webhook(
    State(state): State<Arc<AppState>>,
    Path((env, id)): Path<(String, String)>,
) -> Result<Json<ActionResponse<WebhookView>>, AppError> {
    let tag = parse_env(&env)?;
    let mut portal = state.portal.lock().await;

    let removed = portal.remove_webhook(tag, &id);

    Ok(Json(ActionResponse {
        result: removed.map(WebhookView::from),
        notifications: portal.notifier().drain(),
    }))
}
