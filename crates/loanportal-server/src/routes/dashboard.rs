//! Overview route: `GET /v1/dashboard/{env}`

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use loanportal_core::dashboard::DashboardSummary;

use crate::error::AppError;
use crate::routes::parse_env;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/{env}", get(summary))
}

async fn summary(
    State(state): State<Arc<AppState>>,
    Path(env): Path<String>,
) -> Result<Json<DashboardSummary>, AppError> {
    let tag = parse_env(&env)?;
    let portal = state.portal.lock().await;

    Ok(Json(DashboardSummary::from_registry(portal.registry(), tag)))
}
