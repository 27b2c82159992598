//! Environment-scoped resource registry.
//!
//! The registry maps each [`EnvironmentTag`] to four lists: API keys, IP
//! allow-list entries, webhooks, and endpoint descriptors. It is a value:
//! [`EnvironmentRegistry::replace`] returns a new snapshot and leaves the
//! receiver untouched. Lists are held as `Arc<[T]>`, so partitions and fields
//! that did not change are shared between snapshots and nobody can mutate a
//! list handed out by [`EnvironmentRegistry::get`].
//!
//! # Ids
//!
//! Each partition keeps a per-kind watermark of the highest id it has seen.
//! [`EnvironmentRegistry::issue_id`] hands out `watermark + 1` and advances
//! it, so an id is never reused after a delete. Installing a list through
//! `replace` raises the watermark to cover the list's length and any
//! numeric ids in it.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::environment::EnvironmentTag;
use crate::models::{ApiKeyRecord, EndpointDescriptor, IpAllowEntry, WebhookRecord};

/// The four resource kinds stored per environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ApiKey,
    IpEntry,
    Webhook,
    Endpoint,
}

/// A replacement list for one field of one partition.
#[derive(Debug, Clone)]
pub enum ResourceList {
    ApiKeys(Vec<ApiKeyRecord>),
    IpEntries(Vec<IpAllowEntry>),
    Webhooks(Vec<WebhookRecord>),
    Endpoints(Vec<EndpointDescriptor>),
}

impl ResourceList {
    /// The field this list replaces.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::ApiKeys(_) => ResourceKind::ApiKey,
            Self::IpEntries(_) => ResourceKind::IpEntry,
            Self::Webhooks(_) => ResourceKind::Webhook,
            Self::Endpoints(_) => ResourceKind::Endpoint,
        }
    }
}

/// The resource lists of one environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvironmentResources {
    pub api_keys: Arc<[ApiKeyRecord]>,
    pub ip_entries: Arc<[IpAllowEntry]>,
    pub webhooks: Arc<[WebhookRecord]>,
    pub endpoints: Arc<[EndpointDescriptor]>,
}

/// Highest id issued or observed per resource kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct IdWatermarks {
    api_keys: u64,
    ip_entries: u64,
    webhooks: u64,
    endpoints: u64,
}

impl IdWatermarks {
    fn slot(&mut self, kind: ResourceKind) -> &mut u64 {
        match kind {
            ResourceKind::ApiKey => &mut self.api_keys,
            ResourceKind::IpEntry => &mut self.ip_entries,
            ResourceKind::Webhook => &mut self.webhooks,
            ResourceKind::Endpoint => &mut self.endpoints,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Partition {
    resources: EnvironmentResources,
    watermarks: IdWatermarks,
}

/// In-memory registry of per-environment resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentRegistry {
    partitions: BTreeMap<EnvironmentTag, Partition>,
}

impl EnvironmentRegistry {
    /// An empty registry with no partitions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with an empty partition for each of `tags`.
    #[must_use]
    pub fn with_tags(tags: impl IntoIterator<Item = EnvironmentTag>) -> Self {
        Self {
            partitions: tags
                .into_iter()
                .map(|tag| (tag, Partition::default()))
                .collect(),
        }
    }

    /// The lists for `tag`. A tag without a partition yields empty lists.
    #[must_use]
    pub fn get(&self, tag: EnvironmentTag) -> EnvironmentResources {
        self.partitions
            .get(&tag)
            .map(|p| p.resources.clone())
            .unwrap_or_default()
    }

    /// The startup registry: all three environments with their seed data.
    #[must_use]
    pub fn seeded() -> Self {
        crate::seed::registry()
    }

    /// Whether the registry has a partition for `tag`.
    #[must_use]
    pub fn contains(&self, tag: EnvironmentTag) -> bool {
        self.partitions.contains_key(&tag)
    }

    /// Tags that have a partition, in order.
    pub fn tags(&self) -> impl Iterator<Item = EnvironmentTag> + '_ {
        self.partitions.keys().copied()
    }

    /// Return a new registry in which only `tag`'s field named by `list`
    /// is replaced. Every other tag and field is shared with `self`.
    #[must_use]
    pub fn replace(&self, tag: EnvironmentTag, list: ResourceList) -> Self {
        let mut next = self.clone();
        let partition = next.partitions.entry(tag).or_default();
        let kind = list.kind();

        let observed = match list {
            ResourceList::ApiKeys(items) => {
                let seen = highest_id(items.len(), items.iter().map(|r| r.id.as_str()));
                partition.resources.api_keys = items.into();
                seen
            }
            ResourceList::IpEntries(items) => {
                let seen = highest_id(items.len(), items.iter().map(|r| r.id.as_str()));
                partition.resources.ip_entries = items.into();
                seen
            }
            ResourceList::Webhooks(items) => {
                let seen = highest_id(items.len(), items.iter().map(|r| r.id.as_str()));
                partition.resources.webhooks = items.into();
                seen
            }
            ResourceList::Endpoints(items) => {
                let seen = highest_id(items.len(), items.iter().map(|r| r.id.as_str()));
                partition.resources.endpoints = items.into();
                seen
            }
        };

        let slot = partition.watermarks.slot(kind);
        *slot = (*slot).max(observed);
        next
    }

    /// Allocate the next id for `kind` in `tag`.
    ///
    /// Returns the advanced registry alongside the id. Ids are never handed
    /// out twice, even after the records holding them are removed.
    #[must_use]
    pub fn issue_id(&self, tag: EnvironmentTag, kind: ResourceKind) -> (Self, String) {
        let mut next = self.clone();
        let slot = next.partitions.entry(tag).or_default().watermarks.slot(kind);
        *slot = slot.saturating_add(1);
        let id = slot.to_string();
        (next, id)
    }

    /// Every partition's lists, keyed by tag.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<EnvironmentTag, EnvironmentResources> {
        self.partitions
            .iter()
            .map(|(tag, p)| (*tag, p.resources.clone()))
            .collect()
    }
}

/// The larger of the list length and the highest numeric id in it.
fn highest_id<'a>(len: usize, ids: impl Iterator<Item = &'a str>) -> u64 {
    let by_len = u64::try_from(len).unwrap_or(u64::MAX);
    ids.filter_map(|id| id.parse::<u64>().ok())
        .fold(by_len, u64::max)
}
