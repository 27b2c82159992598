//! Server configuration for the loan portal.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `LOANPORTAL_*` environment variables.

use std::net::SocketAddr;

/// Default listen port when neither `LOANPORTAL_BIND_ADDR` nor `PORT` is set.
const DEFAULT_PORT: u16 = 8080;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Single origin allowed by CORS. Any origin is allowed when unset.
    pub allowed_origin: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on, binds to `0.0.0.0`
    /// - `LOANPORTAL_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `LOANPORTAL_LOG_LEVEL`: log filter (default: `info`)
    /// - `LOANPORTAL_ALLOWED_ORIGIN`: CORS origin for the dashboard (optional)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fallback = SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT));

        // Priority: LOANPORTAL_BIND_ADDR > PORT > default
        let bind_addr = if let Some(addr) = lookup("LOANPORTAL_BIND_ADDR") {
            addr.parse().unwrap_or(fallback)
        } else if let Some(port) = lookup("PORT") {
            SocketAddr::from(([0, 0, 0, 0], port.parse().unwrap_or(DEFAULT_PORT)))
        } else {
            fallback
        };

        let log_level = lookup("LOANPORTAL_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let allowed_origin = lookup("LOANPORTAL_ALLOWED_ORIGIN").filter(|o| !o.trim().is_empty());

        Self {
            bind_addr,
            log_level,
            allowed_origin,
        }
    }
}
