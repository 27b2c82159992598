//! API key operations: generate, revoke, rotate.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::environment::EnvironmentTag;
use crate::error::ValidationError;
use crate::keygen::{self, OneTimeSecret};
use crate::models::ApiKeyRecord;
use crate::ops::{take_by_id, update_by_id};
use crate::registry::{EnvironmentRegistry, ResourceKind, ResourceList};
use crate::validate;

/// A stored key together with the secret it was issued with.
///
/// The secret is not part of the registry; once this value is dropped it is
/// gone.
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    pub record: ApiKeyRecord,
    pub secret: OneTimeSecret,
}

/// Keys stored for `tag`.
#[must_use]
pub fn list(registry: &EnvironmentRegistry, tag: EnvironmentTag) -> Arc<[ApiKeyRecord]> {
    registry.get(tag).api_keys
}

/// Generate a new key named `name` in `tag`.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] if `name` is blank.
pub fn generate(
    registry: &EnvironmentRegistry,
    tag: EnvironmentTag,
    name: &str,
) -> Result<(EnvironmentRegistry, GeneratedKey), ValidationError> {
    validate::require_name(name)?;

    let secret = keygen::generate_secret(tag);
    let (registry, id) = registry.issue_id(tag, ResourceKind::ApiKey);
    let record = ApiKeyRecord {
        id,
        name: name.trim().to_owned(),
        secret_prefix: keygen::redact(secret.expose()),
        created_at: Utc::now(),
        last_used_at: None,
        environment: tag,
    };

    let mut keys = registry.get(tag).api_keys.to_vec();
    keys.push(record.clone());
    let registry = registry.replace(tag, ResourceList::ApiKeys(keys));

    info!(env = %tag, id = %record.id, name = %record.name, "api key generated");
    Ok((registry, GeneratedKey { record, secret }))
}

/// Remove the key with `id` from `tag`.
///
/// Returns the removed record, or `None` (and an unchanged registry) when
/// no key has that id.
#[must_use]
pub fn revoke(
    registry: &EnvironmentRegistry,
    tag: EnvironmentTag,
    id: &str,
) -> (EnvironmentRegistry, Option<ApiKeyRecord>) {
    let keys = registry.get(tag).api_keys;
    let Some((rest, removed)) = take_by_id(&keys, id, |k| k.id.as_str()) else {
        debug!(env = %tag, id, "revoke: no such api key");
        return (registry.clone(), None);
    };

    info!(env = %tag, id, "api key revoked");
    (registry.replace(tag, ResourceList::ApiKeys(rest)), Some(removed))
}

/// Issue a fresh secret for the key with `id`, keeping its id, name, and
/// creation time. The usage timestamp is cleared since the old secret no
/// longer works.
///
/// Returns `None` (and an unchanged registry) when no key has that id.
#[must_use]
pub fn rotate(
    registry: &EnvironmentRegistry,
    tag: EnvironmentTag,
    id: &str,
) -> (EnvironmentRegistry, Option<GeneratedKey>) {
    let keys = registry.get(tag).api_keys;
    let secret = keygen::generate_secret(tag);
    let prefix = keygen::redact(secret.expose());

    let Some((next, record)) = update_by_id(
        &keys,
        id,
        |k| k.id.as_str(),
        |k| ApiKeyRecord {
            secret_prefix: prefix,
            last_used_at: None,
            ..k.clone()
        },
    ) else {
        debug!(env = %tag, id, "rotate: no such api key");
        return (registry.clone(), None);
    };

    info!(env = %tag, id, "api key rotated");
    (
        registry.replace(tag, ResourceList::ApiKeys(next)),
        Some(GeneratedKey { record, secret }),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn generate_in_seeded_uat_issues_id_two() {
        let registry = seed::registry();
        let (next, key) = generate(&registry, EnvironmentTag::Uat, "Second Key").unwrap();

        assert_eq!(key.record.id, "2");
        assert_eq!(key.record.name, "Second Key");
        assert!(key.record.secret_prefix.starts_with("loan_pk_uat_"));
        assert!(key.record.secret_prefix.ends_with("****"));
        assert_eq!(key.record.last_used_at, None);
        assert_eq!(key.record.environment, EnvironmentTag::Uat);
        assert_eq!(list(&next, EnvironmentTag::Uat).len(), 2);
    }

    #[test]
    fn stored_prefix_is_secret_with_masked_tail() {
        let registry = seed::registry();
        let (_, key) = generate(&registry, EnvironmentTag::Prod, "Batch").unwrap();
        let secret = key.secret.expose();

        assert_eq!(key.record.secret_prefix.len(), secret.len());
        assert_eq!(
            &key.record.secret_prefix[..secret.len() - 4],
            &secret[..secret.len() - 4]
        );
        assert_ne!(key.record.secret_prefix, secret);
    }

    #[test]
    fn full_secret_is_not_stored() {
        let registry = seed::registry();
        let (next, key) = generate(&registry, EnvironmentTag::Dev, "CI").unwrap();
        let stored = list(&next, EnvironmentTag::Dev);
        assert!(stored.iter().all(|k| k.secret_prefix != key.secret.expose()));
    }

    #[test]
    fn blank_name_fails_without_touching_registry() {
        let registry = seed::registry();
        for tag in EnvironmentTag::ALL {
            let err = generate(&registry, tag, "").unwrap_err();
            assert_eq!(err, ValidationError::EmptyName);
            let err = generate(&registry, tag, "   ").unwrap_err();
            assert_eq!(err, ValidationError::EmptyName);
            assert_eq!(list(&registry, tag).len(), 1);
        }
    }

    #[test]
    fn generate_only_touches_its_own_tag() {
        let registry = seed::registry();
        let (next, _) = generate(&registry, EnvironmentTag::Uat, "Another").unwrap();
        assert!(Arc::ptr_eq(
            &list(&registry, EnvironmentTag::Prod),
            &list(&next, EnvironmentTag::Prod)
        ));
        assert_eq!(registry.get(EnvironmentTag::Uat).webhooks, next.get(EnvironmentTag::Uat).webhooks);
    }

    #[test]
    fn generate_then_revoke_restores_list() {
        let registry = seed::registry();
        for tag in EnvironmentTag::ALL {
            let (added, key) = generate(&registry, tag, "Temp").unwrap();
            let (removed, taken) = revoke(&added, tag, &key.record.id);
            assert_eq!(taken.unwrap().id, key.record.id);
            assert_eq!(list(&removed, tag), list(&registry, tag));
        }
    }

    #[test]
    fn revoke_missing_id_is_noop() {
        let registry = seed::registry();
        let (next, removed) = revoke(&registry, EnvironmentTag::Dev, "42");
        assert!(removed.is_none());
        assert_eq!(list(&next, EnvironmentTag::Dev), list(&registry, EnvironmentTag::Dev));
    }

    #[test]
    fn ids_are_not_reused_after_revoke() {
        let registry = seed::registry();
        let (registry, first) = generate(&registry, EnvironmentTag::Uat, "A").unwrap();
        let (registry, _) = revoke(&registry, EnvironmentTag::Uat, &first.record.id);
        let (_, second) = generate(&registry, EnvironmentTag::Uat, "B").unwrap();
        assert_eq!(first.record.id, "2");
        assert_eq!(second.record.id, "3");
    }

    #[test]
    fn rotate_replaces_prefix_and_keeps_identity() {
        let registry = seed::registry();
        let before = list(&registry, EnvironmentTag::Uat)[0].clone();
        let (next, rotated) = rotate(&registry, EnvironmentTag::Uat, &before.id);
        let rotated = rotated.unwrap();

        assert_eq!(rotated.record.id, before.id);
        assert_eq!(rotated.record.name, before.name);
        assert_eq!(rotated.record.created_at, before.created_at);
        assert_eq!(rotated.record.last_used_at, None);
        assert_ne!(rotated.record.secret_prefix, before.secret_prefix);
        assert!(rotated.secret.expose().starts_with("loan_pk_uat_"));
        assert_eq!(list(&next, EnvironmentTag::Uat)[0], rotated.record);
    }

    #[test]
    fn rotate_missing_id_is_noop() {
        let registry = seed::registry();
        let (next, rotated) = rotate(&registry, EnvironmentTag::Prod, "9");
        assert!(rotated.is_none());
        assert_eq!(list(&next, EnvironmentTag::Prod), list(&registry, EnvironmentTag::Prod));
    }
}
