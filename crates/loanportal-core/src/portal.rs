//! User-action dispatch.
//!
//! A [`Portal`] owns the registry and the two sinks. Every method is one
//! user action: it runs the matching operation, swaps in the resulting
//! registry, and emits the notification the user sees. Failed actions
//! leave the registry and the new-key flag untouched.

use tracing::debug;

use crate::catalog::{self, Collection, EnvironmentFile};
use crate::environment::EnvironmentTag;
use crate::error::{CatalogError, ValidationError};
use crate::keygen::OneTimeSecret;
use crate::models::{ApiKeyRecord, IpAllowEntry, WebhookRecord};
use crate::notify::{Clipboard, NotificationKind, Notifier};
use crate::ops::api_keys::{self, GeneratedKey};
use crate::ops::{ip_allowlist, webhooks};
use crate::registry::EnvironmentRegistry;

/// Whether the most recently issued secret is on display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NewKeyFlag {
    #[default]
    Hidden,
    Shown(OneTimeSecret),
}

impl NewKeyFlag {
    /// The secret on display, if any.
    #[must_use]
    pub const fn secret(&self) -> Option<&OneTimeSecret> {
        match self {
            Self::Hidden => None,
            Self::Shown(secret) => Some(secret),
        }
    }
}

/// Owns the registry, the notification and clipboard sinks, and the
/// new-key flag. One instance serves every user action.
pub struct Portal<N, C> {
    registry: EnvironmentRegistry,
    notifier: N,
    clipboard: C,
    new_key: NewKeyFlag,
}

impl<N: Notifier, C: Clipboard> Portal<N, C> {
    /// A portal over `registry` with the new-key flag hidden.
    #[must_use]
    pub fn new(registry: EnvironmentRegistry, notifier: N, clipboard: C) -> Self {
        Self {
            registry,
            notifier,
            clipboard,
            new_key: NewKeyFlag::Hidden,
        }
    }

    /// A portal over the seeded registry.
    #[must_use]
    pub fn seeded(notifier: N, clipboard: C) -> Self {
        Self::new(EnvironmentRegistry::seeded(), notifier, clipboard)
    }

    /// The current registry snapshot.
    #[must_use]
    pub const fn registry(&self) -> &EnvironmentRegistry {
        &self.registry
    }

    /// The notification sink.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The clipboard sink.
    #[must_use]
    pub const fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Whether a freshly issued secret is on display.
    #[must_use]
    pub const fn new_key(&self) -> &NewKeyFlag {
        &self.new_key
    }

    fn success(&self, message: &str) {
        self.notifier.notify(NotificationKind::Success, message);
    }

    fn failure(&self, message: &str) {
        self.notifier.notify(NotificationKind::Error, message);
    }

    // ── API keys ─────────────────────────────────────────────────────

    /// Generate a key and put its secret on display.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from a blank name, after emitting its
    /// notice as an error notification.
    pub fn generate_key(
        &mut self,
        tag: EnvironmentTag,
        name: &str,
    ) -> Result<GeneratedKey, ValidationError> {
        match api_keys::generate(&self.registry, tag, name) {
            Ok((registry, key)) => {
                self.registry = registry;
                self.new_key = NewKeyFlag::Shown(key.secret.clone());
                self.success("API key generated successfully!");
                Ok(key)
            }
            Err(err) => {
                self.failure(err.notice());
                Err(err)
            }
        }
    }

    /// Revoke a key. Unknown ids leave the registry unchanged but still
    /// notify, so every delete confirms to the user.
    pub fn revoke_key(&mut self, tag: EnvironmentTag, id: &str) -> Option<ApiKeyRecord> {
        let (registry, removed) = api_keys::revoke(&self.registry, tag, id);
        self.registry = registry;
        self.success("API key deleted successfully");
        removed
    }

    /// Issue a new secret for an existing key and put it on display.
    pub fn rotate_key(&mut self, tag: EnvironmentTag, id: &str) -> Option<GeneratedKey> {
        let (registry, rotated) = api_keys::rotate(&self.registry, tag, id);
        self.registry = registry;
        if let Some(key) = &rotated {
            self.new_key = NewKeyFlag::Shown(key.secret.clone());
            self.success("API key rotated successfully");
        }
        rotated
    }

    /// Hide the displayed secret. It cannot be shown again.
    pub fn dismiss_new_key(&mut self) {
        self.new_key = NewKeyFlag::Hidden;
    }

    /// Copy the displayed secret. Returns `false` when none is shown.
    pub fn copy_new_key(&self) -> bool {
        let Some(secret) = self.new_key.secret() else {
            debug!("copy requested with no key on display");
            return false;
        };
        self.copy_to_clipboard(secret.expose());
        true
    }

    pub fn copy_to_clipboard(&self, text: &str) {
        self.clipboard.copy(text);
        self.success("Copied to clipboard");
    }

    // ── IP allow-list ────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns the [`ValidationError`] for a blank or malformed address,
    /// after emitting its notice.
    pub fn add_ip(
        &mut self,
        tag: EnvironmentTag,
        address: &str,
        description: &str,
    ) -> Result<IpAllowEntry, ValidationError> {
        match ip_allowlist::add(&self.registry, tag, address, description) {
            Ok((registry, entry)) => {
                self.registry = registry;
                self.success("IP address added successfully");
                Ok(entry)
            }
            Err(err) => {
                self.failure(err.notice());
                Err(err)
            }
        }
    }

    /// Remove an allow-list entry. Notifies even when the id is unknown.
    pub fn remove_ip(&mut self, tag: EnvironmentTag, id: &str) -> Option<IpAllowEntry> {
        let (registry, removed) = ip_allowlist::remove(&self.registry, tag, id);
        self.registry = registry;
        self.success("IP address removed successfully");
        removed
    }

    // ── Webhooks ─────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns the [`ValidationError`] for a blank or malformed URL or an
    /// empty event list, after emitting its notice.
    pub fn add_webhook(
        &mut self,
        tag: EnvironmentTag,
        url: &str,
        events_csv: &str,
    ) -> Result<WebhookRecord, ValidationError> {
        match webhooks::add(&self.registry, tag, url, events_csv) {
            Ok((registry, webhook)) => {
                self.registry = registry;
                self.success("Webhook added successfully");
                Ok(webhook)
            }
            Err(err) => {
                self.failure(err.notice());
                Err(err)
            }
        }
    }

    /// Flip a webhook's `active` flag. Emits no notification.
    pub fn toggle_webhook(&mut self, tag: EnvironmentTag, id: &str) -> Option<WebhookRecord> {
        let (registry, updated) = webhooks::toggle_active(&self.registry, tag, id);
        self.registry = registry;
        updated
    }

    /// Remove a webhook. Notifies even when the id is unknown.
    pub fn remove_webhook(&mut self, tag: EnvironmentTag, id: &str) -> Option<WebhookRecord> {
        let (registry, removed) = webhooks::remove(&self.registry, tag, id);
        self.registry = registry;
        self.success("Webhook removed successfully");
        removed
    }

    // ── Downloads ────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`CatalogError::CollectionNotFound`] for an unknown id.
    pub fn download_collection(&self, id: &str) -> Result<&'static Collection, CatalogError> {
        match catalog::collection(id) {
            Ok(collection) => {
                self.success(&format!("Downloading {}", collection.name));
                Ok(collection)
            }
            Err(err) => {
                self.failure(&err.to_string());
                Err(err)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::NoEnvironmentFile`] for the development
    /// environment.
    pub fn download_environment_file(
        &self,
        tag: EnvironmentTag,
    ) -> Result<&'static EnvironmentFile, CatalogError> {
        match catalog::environment_file(tag) {
            Ok(file) => {
                self.success(&format!("Downloading {} environment", file.label));
                Ok(file)
            }
            Err(err) => {
                self.failure(&err.to_string());
                Err(err)
            }
        }
    }
}
