//! IP allow-list operations: add and remove.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::environment::EnvironmentTag;
use crate::error::ValidationError;
use crate::models::IpAllowEntry;
use crate::ops::take_by_id;
use crate::registry::{EnvironmentRegistry, ResourceKind, ResourceList};
use crate::validate;

/// Entries allowed in `tag`.
#[must_use]
pub fn list(registry: &EnvironmentRegistry, tag: EnvironmentTag) -> Arc<[IpAllowEntry]> {
    registry.get(tag).ip_entries
}

/// Allow `address` in `tag`. The description may be empty.
///
/// Only the dotted-quad syntax is checked; out-of-range octets such as
/// `999.999.999.999` are accepted.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyAddress`] for a blank address and
/// [`ValidationError::InvalidIpFormat`] when the syntax check fails.
pub fn add(
    registry: &EnvironmentRegistry,
    tag: EnvironmentTag,
    address: &str,
    description: &str,
) -> Result<(EnvironmentRegistry, IpAllowEntry), ValidationError> {
    let address = address.trim();
    validate::require_ipv4(address)?;

    let (registry, id) = registry.issue_id(tag, ResourceKind::IpEntry);
    let entry = IpAllowEntry {
        id,
        address: address.to_owned(),
        description: description.trim().to_owned(),
        created_at: Utc::now(),
        environment: tag,
    };

    let mut entries = registry.get(tag).ip_entries.to_vec();
    entries.push(entry.clone());

    info!(env = %tag, id = %entry.id, address = %entry.address, "ip allow-list entry added");
    Ok((registry.replace(tag, ResourceList::IpEntries(entries)), entry))
}

/// Remove the entry with `id` from `tag`. Missing ids are a no-op.
#[must_use]
pub fn remove(
    registry: &EnvironmentRegistry,
    tag: EnvironmentTag,
    id: &str,
) -> (EnvironmentRegistry, Option<IpAllowEntry>) {
    let entries = registry.get(tag).ip_entries;
    let Some((rest, removed)) = take_by_id(&entries, id, |e| e.id.as_str()) else {
        debug!(env = %tag, id, "remove: no such ip allow-list entry");
        return (registry.clone(), None);
    };

    info!(env = %tag, id, address = %removed.address, "ip allow-list entry removed");
    (registry.replace(tag, ResourceList::IpEntries(rest)), Some(removed))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn add_appends_with_fresh_id() {
        let registry = seed::registry();
        let (next, entry) = add(&registry, EnvironmentTag::Dev, "10.0.0.8", "VPN").unwrap();
        assert_eq!(entry.id, "2");
        assert_eq!(entry.description, "VPN");
        let entries = list(&next, EnvironmentTag::Dev);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], entry);
    }

    #[test]
    fn description_is_optional() {
        let registry = seed::registry();
        let (_, entry) = add(&registry, EnvironmentTag::Uat, "10.1.1.1", "").unwrap();
        assert!(entry.description.is_empty());
    }

    #[test]
    fn out_of_range_octets_are_accepted() {
        let registry = seed::registry();
        let (_, entry) = add(&registry, EnvironmentTag::Prod, "999.999.999.999", "").unwrap();
        assert_eq!(entry.address, "999.999.999.999");
    }

    #[test]
    fn blank_address_is_rejected() {
        let registry = seed::registry();
        let err = add(&registry, EnvironmentTag::Dev, "  ", "x").unwrap_err();
        assert_eq!(err, ValidationError::EmptyAddress);
        assert_eq!(err.to_string(), "empty address");
    }

    #[test]
    fn malformed_address_is_rejected() {
        let registry = seed::registry();
        for bad in ["abc", "1.2.3", "1.2.3.4/24", "::1"] {
            let err = add(&registry, EnvironmentTag::Dev, bad, "").unwrap_err();
            assert_eq!(err, ValidationError::InvalidIpFormat, "{bad}");
            assert_eq!(err.to_string(), "invalid format");
        }
    }

    #[test]
    fn add_then_remove_restores_list() {
        let registry = seed::registry();
        for tag in EnvironmentTag::ALL {
            let (added, entry) = add(&registry, tag, "172.16.0.1", "tmp").unwrap();
            let (removed, taken) = remove(&added, tag, &entry.id);
            assert!(taken.is_some());
            assert_eq!(list(&removed, tag), list(&registry, tag));
        }
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let registry = seed::registry();
        let (next, removed) = remove(&registry, EnvironmentTag::Uat, "does-not-exist");
        assert!(removed.is_none());
        assert_eq!(list(&next, EnvironmentTag::Uat), list(&registry, EnvironmentTag::Uat));
    }
}
