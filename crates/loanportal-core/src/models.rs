//! Registry records.
//!
//! Every record is an immutable value: operations never edit one in place,
//! they build a replacement and swap it into a new registry snapshot. IDs
//! are strings so the seeded literals and issued ids share one shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentTag;

// ── API keys ─────────────────────────────────────────────────────────

/// A stored API key. Only the redacted prefix is kept; the full secret is
/// handed out once at generation and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyRecord {
    pub id: String,
    pub name: String,
    pub secret_prefix: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub environment: EnvironmentTag,
}

// ── IP allow-list ────────────────────────────────────────────────────

/// A permitted source address for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpAllowEntry {
    pub id: String,
    pub address: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub environment: EnvironmentTag,
}

// ── Webhooks ─────────────────────────────────────────────────────────

/// A webhook subscription. `events` keeps the order the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookRecord {
    pub id: String,
    pub url: String,
    pub events: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub environment: EnvironmentTag,
}

// ── Endpoints ────────────────────────────────────────────────────────

/// HTTP method of a documented endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Reported health of an endpoint or environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointStatus {
    Operational,
    #[serde(rename = "Degraded Performance")]
    DegradedPerformance,
    Maintenance,
}

impl std::fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operational => write!(f, "Operational"),
            Self::DegradedPerformance => write!(f, "Degraded Performance"),
            Self::Maintenance => write!(f, "Maintenance"),
        }
    }
}

/// Read-only reference data describing one API endpoint in an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    pub id: String,
    pub path: String,
    pub method: HttpMethod,
    pub status: EndpointStatus,
    pub latency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
