//! HTTP route handlers, one module per portal area.

pub mod collections;
pub mod dashboard;
pub mod docs;
pub mod environments;
pub mod health;
pub mod ip_allowlist;
pub mod keys;
pub mod webhooks;

use serde::Serialize;

use loanportal_core::environment::EnvironmentTag;
use loanportal_core::notify::Notification;

use crate::error::AppError;

/// Resolve an environment path segment. Unknown tags are a 404.
pub(crate) fn parse_env(raw: &str) -> Result<EnvironmentTag, AppError> {
    Ok(raw.parse::<EnvironmentTag>()?)
}

/// Body of every mutating response: what the action produced, if anything,
/// and the notifications it emitted.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T> {
    pub result: Option<T>,
    pub notifications: Vec<Notification>,
}
