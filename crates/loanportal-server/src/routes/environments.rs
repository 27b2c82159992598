//! Environment and status routes: `/v1/environments/*` and `/v1/status/*`

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use loanportal_core::catalog::{self, EnvironmentProfile, SystemStatus};
use loanportal_core::display::{self, BadgeColor};
use loanportal_core::environment::EnvironmentTag;
use loanportal_core::models::EndpointDescriptor;
use loanportal_core::registry::EnvironmentResources;

use crate::error::AppError;
use crate::routes::parse_env;
use crate::state::AppState;

/// Build the `/v1/environments` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_environments))
        .route("/{env}", get(environment_snapshot))
        .route("/{env}/endpoints", get(list_endpoints))
}

/// Build the `/v1/status` router.
pub fn status_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(system_status))
        .route("/{env}", get(environment_status))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EnvironmentSummary {
    pub environment: EnvironmentTag,
    pub label: &'static str,
    pub badge: BadgeColor,
}

impl From<EnvironmentTag> for EnvironmentSummary {
    fn from(tag: EnvironmentTag) -> Self {
        Self {
            environment: tag,
            label: tag.label(),
            badge: display::environment_badge(tag),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnvironmentListResponse {
    pub environments: Vec<EnvironmentSummary>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    #[serde(flatten)]
    pub summary: EnvironmentSummary,
    pub resources: EnvironmentResources,
}

#[derive(Debug, Serialize)]
pub struct EndpointView {
    #[serde(flatten)]
    pub endpoint: EndpointDescriptor,
    pub method_badge: BadgeColor,
    pub status_badge: BadgeColor,
}

#[derive(Debug, Serialize)]
pub struct EndpointListResponse {
    pub endpoints: Vec<EndpointView>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub status: SystemStatus,
    pub environments: &'static [EnvironmentProfile],
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: EnvironmentProfile,
    pub status_badge: BadgeColor,
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn list_environments(State(state): State<Arc<AppState>>) -> Json<EnvironmentListResponse> {
    let portal = state.portal.lock().await;
    let environments = portal
        .registry()
        .tags()
        .map(EnvironmentSummary::from)
        .collect();

    Json(EnvironmentListResponse { environments })
}

async fn environment_snapshot(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let tag = parse_env(&env)?;
    let portal = state.portal.lock().await;

    Ok(Json(SnapshotResponse {
        summary: tag.into(),
        resources: portal.registry().get(tag),
    }))
}

async fn list_endpoints(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
) -> Result<Json<EndpointListResponse>, AppError> {
    let tag = parse_env(&env)?;
    let portal = state.portal.lock().await;

    let endpoints = portal
        .registry()
        .get(tag)
        .endpoints
        .iter()
        .map(|e| EndpointView {
            method_badge: display::method_badge(e.method),
            status_badge: display::status_badge(e.status),
            endpoint: e.clone(),
        })
        .collect();

    Ok(Json(EndpointListResponse { endpoints }))
}

async fn system_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: catalog::system_status(),
        environments: catalog::profiles(),
    })
}

async fn environment_status(Path(env): Path<String>) -> Result<Json<ProfileResponse>, AppError> {
    let profile = *catalog::profile(parse_env(&env)?)?;

    Ok(Json(ProfileResponse {
        status_badge: display::status_badge(profile.status),
        profile,
    }))
}
