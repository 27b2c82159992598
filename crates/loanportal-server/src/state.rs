//! Shared application state for the loan portal server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. The portal sits behind one async mutex, so each
//! request runs its action against the registry alone.

use tokio::sync::Mutex;

use loanportal_core::notify::{NotificationLog, TracingClipboard};
use loanportal_core::portal::Portal;

/// The portal as wired into the server.
pub type ServerPortal = Portal<NotificationLog, TracingClipboard>;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    pub portal: Mutex<ServerPortal>,
}

impl AppState {
    #[must_use]
    pub fn new(portal: ServerPortal) -> Self {
        Self {
            portal: Mutex::new(portal),
        }
    }

    /// State over the seeded registry.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(Portal::seeded(NotificationLog::new(), TracingClipboard))
    }
}
