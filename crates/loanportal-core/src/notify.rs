//! Notification and clipboard sinks.
//!
//! Both are external collaborators: the portal calls them fire-and-forget
//! and never inspects a result. [`NotificationLog`] buffers notifications so
//! a request handler can return the ones its action produced;
//! [`TracingNotifier`] only logs. [`TracingClipboard`] records that a copy
//! happened without keeping the text, since that text may be a one-time
//! secret.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// One transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Receives user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Deliver a notification. Delivery failures are not reported.
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Receives text the user asked to copy.
pub trait Clipboard: Send + Sync {
    /// Place `text` on the clipboard.
    fn copy(&self, text: &str);
}

/// Notifier that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => tracing::info!(text = message, "notification"),
            NotificationKind::Error => tracing::warn!(text = message, "notification"),
        }
    }
}

/// Notifier that buffers messages until drained.
#[derive(Debug, Default)]
pub struct NotificationLog {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, kind: NotificationKind, message: &str) {
        tracing::debug!(?kind, text = message, "notification queued");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                kind,
                message: message.to_owned(),
            });
    }
}

/// Clipboard that logs each copy by length and retains nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingClipboard;

impl Clipboard for TracingClipboard {
    fn copy(&self, text: &str) {
        tracing::debug!(len = text.len(), "copied to clipboard");
    }
}

/// Clipboard that remembers the last copied text.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently copied text, if any.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_owned());
    }
}

// The clipboard may hold a one-time secret.
#[cfg(test)]
impl std::fmt::Debug for MemoryClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryClipboard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_drains_in_order_and_empties() {
        let log = NotificationLog::new();
        log.notify(NotificationKind::Success, "first");
        log.notify(NotificationKind::Error, "second");

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].kind, NotificationKind::Error);
        assert!(log.drain().is_empty());
    }

    #[test]
    fn clipboard_keeps_last_copy() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);
        clipboard.copy("one");
        clipboard.copy("two");
        assert_eq!(clipboard.contents().as_deref(), Some("two"));
    }

    #[test]
    fn tracing_clipboard_has_nowhere_to_keep_text() {
        assert_eq!(std::mem::size_of::<TracingClipboard>(), 0);
        TracingClipboard.copy("loan_pk_uat_abcdefgh");
    }
}
