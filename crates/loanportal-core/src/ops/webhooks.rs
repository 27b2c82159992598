//! Webhook operations: add, toggle, remove.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::environment::EnvironmentTag;
use crate::error::ValidationError;
use crate::models::WebhookRecord;
use crate::ops::{take_by_id, update_by_id};
use crate::registry::{EnvironmentRegistry, ResourceKind, ResourceList};
use crate::validate;

/// Webhooks configured for `tag`.
#[must_use]
pub fn list(registry: &EnvironmentRegistry, tag: EnvironmentTag) -> Arc<[WebhookRecord]> {
    registry.get(tag).webhooks
}

/// Subscribe `url` to the comma-separated `events_csv` in `tag`.
/// New webhooks start active.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyUrl`], [`ValidationError::MalformedUrl`],
/// or [`ValidationError::NoEvents`], checked in that order.
pub fn add(
    registry: &EnvironmentRegistry,
    tag: EnvironmentTag,
    url: &str,
    events_csv: &str,
) -> Result<(EnvironmentRegistry, WebhookRecord), ValidationError> {
    let url = url.trim();
    validate::require_url(url)?;
    let events = validate::parse_events(events_csv)?;

    let (registry, id) = registry.issue_id(tag, ResourceKind::Webhook);
    let webhook = WebhookRecord {
        id,
        url: url.to_owned(),
        events,
        active: true,
        created_at: Utc::now(),
        environment: tag,
    };

    let mut webhooks = registry.get(tag).webhooks.to_vec();
    webhooks.push(webhook.clone());

    info!(
        env = %tag,
        id = %webhook.id,
        url = %webhook.url,
        events = webhook.events.len(),
        "webhook added"
    );
    Ok((registry.replace(tag, ResourceList::Webhooks(webhooks)), webhook))
}

/// Flip the `active` flag of the webhook with `id`. Missing ids are a no-op.
#[must_use]
pub fn toggle_active(
    registry: &EnvironmentRegistry,
    tag: EnvironmentTag,
    id: &str,
) -> (EnvironmentRegistry, Option<WebhookRecord>) {
    let webhooks = registry.get(tag).webhooks;
    let Some((next, updated)) = update_by_id(
        &webhooks,
        id,
        |w| w.id.as_str(),
        |w| WebhookRecord {
            active: !w.active,
            ..w.clone()
        },
    ) else {
        debug!(env = %tag, id, "toggle: no such webhook");
        return (registry.clone(), None);
    };

    info!(env = %tag, id, active = updated.active, "webhook toggled");
    (registry.replace(tag, ResourceList::Webhooks(next)), Some(updated))
}

/// Remove the webhook with `id` from `tag`. Missing ids are a no-op.
#[must_use]
pub fn remove(
    registry: &EnvironmentRegistry,
    tag: EnvironmentTag,
    id: &str,
) -> (EnvironmentRegistry, Option<WebhookRecord>) {
    let webhooks = registry.get(tag).webhooks;
    let Some((rest, removed)) = take_by_id(&webhooks, id, |w| w.id.as_str()) else {
        debug!(env = %tag, id, "remove: no such webhook");
        return (registry.clone(), None);
    };

    info!(env = %tag, id, "webhook removed");
    (registry.replace(tag, ResourceList::Webhooks(rest)), Some(removed))
}
