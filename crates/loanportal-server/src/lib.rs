//! Loan portal HTTP server.
//!
//! Exposes the portal's actions and read-only views as a JSON API under
//! `/v1/*`. Mutating responses carry the notifications the action emitted.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Assemble every route with tracing and response hardening headers.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/v1/dashboard", routes::dashboard::router())
        .nest("/v1/environments", routes::environments::router())
        .nest("/v1/environments/{env}/keys", routes::keys::router())
        .nest("/v1/keys/new", routes::keys::new_key_router())
        .nest("/v1/environments/{env}/ip-allowlist", routes::ip_allowlist::router())
        .nest("/v1/environments/{env}/webhooks", routes::webhooks::router())
        .nest("/v1/status", routes::environments::status_router())
        .nest("/v1/docs", routes::docs::router())
        .merge(routes::collections::router())
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

/// CORS for the dashboard: the configured origin, or any origin when unset.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = match config.allowed_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(_)) => {
            tracing::warn!("LOANPORTAL_ALLOWED_ORIGIN is not a valid header value, allowing any origin");
            AllowOrigin::from(Any)
        }
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
