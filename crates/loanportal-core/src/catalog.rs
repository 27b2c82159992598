//! Static reference content: documentation, Postman collections,
//! environment files, client libraries, and environment status.
//!
//! Nothing here is mutable. Lookups borrow from `'static` tables.

use serde::Serialize;

use crate::environment::EnvironmentTag;
use crate::error::CatalogError;
use crate::models::EndpointStatus;

// ── Documentation ────────────────────────────────────────────────────

/// One page of the API reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocSection {
    pub id: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

static SECTIONS: [DocSection; 6] = [
    DocSection {
        id: "intro",
        title: "Introduction",
        content: "Welcome to the Loan API. The Loan API lets you integrate with the loan \
                  processing system to submit loan applications, check loan status, and \
                  retrieve loan details.",
    },
    DocSection {
        id: "auth",
        title: "Authentication",
        content: "All API requests must include an API key in the header: \
                  `Authorization: Bearer YOUR_API_KEY`. API keys are environment-specific; \
                  use the key issued for the environment you are calling.",
    },
    DocSection {
        id: "endpoints",
        title: "Endpoints",
        content: "POST /applications submits a new loan application. \
                  GET /applications/{id} returns a specific application. \
                  GET /applications lists all applications. \
                  PATCH /applications/{id} updates an existing application. \
                  DELETE /applications/{id} cancels an application.",
    },
    DocSection {
        id: "errors",
        title: "Error Handling",
        content: "The API uses standard HTTP status codes to indicate success or failure. \
                  Error responses carry a JSON body of the form \
                  {\"error\": {\"code\": \"error_code\", \"message\": \"...\", \"details\": {}}}.",
    },
    DocSection {
        id: "rate-limits",
        title: "Rate Limits",
        content: "UAT environment: 100 requests per minute. Production environment: 500 \
                  requests per minute. Limits are reported in the X-RateLimit-Limit, \
                  X-RateLimit-Remaining, and X-RateLimit-Reset response headers.",
    },
    DocSection {
        id: "webhooks",
        title: "Webhooks",
        content: "The API sends webhooks for application.created, application.updated, \
                  application.approved, and application.declined. Configure webhook \
                  endpoints in the settings section.",
    },
];

/// All documentation sections in reading order.
#[must_use]
pub fn sections() -> &'static [DocSection] {
    &SECTIONS
}

/// Look up a section by id.
///
/// # Errors
///
/// Returns [`CatalogError::SectionNotFound`] for an unknown id.
pub fn section(id: &str) -> Result<&'static DocSection, CatalogError> {
    SECTIONS
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| CatalogError::SectionNotFound { id: id.to_owned() })
}

/// Sections whose title or content contains `query`, ignoring case.
/// An empty query matches every section.
#[must_use]
pub fn search(query: &str) -> Vec<&'static DocSection> {
    let needle = query.trim().to_lowercase();
    SECTIONS
        .iter()
        .filter(|s| {
            s.title.to_lowercase().contains(&needle) || s.content.to_lowercase().contains(&needle)
        })
        .collect()
}

// ── Collections ──────────────────────────────────────────────────────

/// Which environments a collection is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Uat,
    Prod,
    Both,
}

impl Availability {
    /// Whether a collection with this availability is listed for `tag`.
    #[must_use]
    pub const fn includes(self, tag: EnvironmentTag) -> bool {
        matches!(
            (self, tag),
            (Self::Both, _) | (Self::Uat, EnvironmentTag::Uat) | (Self::Prod, EnvironmentTag::Prod)
        )
    }
}

/// A downloadable Postman collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub availability: Availability,
    /// ISO date of the last revision.
    pub last_updated: &'static str,
}

static COLLECTIONS: [Collection; 4] = [
    Collection {
        id: "1",
        name: "Loan API - Complete Collection",
        description: "All API endpoints for the loan processing system.",
        availability: Availability::Both,
        last_updated: "2023-11-15",
    },
    Collection {
        id: "2",
        name: "Loan API - Application Endpoints",
        description: "Endpoints for submitting and managing loan applications.",
        availability: Availability::Both,
        last_updated: "2023-11-10",
    },
    Collection {
        id: "3",
        name: "Loan API - User Management",
        description: "Endpoints for managing users and permissions.",
        availability: Availability::Both,
        last_updated: "2023-10-28",
    },
    Collection {
        id: "4",
        name: "Loan API - Webhooks",
        description: "Test and manage webhook configurations.",
        availability: Availability::Uat,
        last_updated: "2023-10-15",
    },
];

#[must_use]
pub fn collections() -> &'static [Collection] {
    &COLLECTIONS
}

/// Collections listed for `tag`.
#[must_use]
pub fn collections_for(tag: EnvironmentTag) -> Vec<&'static Collection> {
    COLLECTIONS
        .iter()
        .filter(|c| c.availability.includes(tag))
        .collect()
}

/// Look up a collection by id.
///
/// # Errors
///
/// Returns [`CatalogError::CollectionNotFound`] for an unknown id.
pub fn collection(id: &str) -> Result<&'static Collection, CatalogError> {
    COLLECTIONS
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| CatalogError::CollectionNotFound { id: id.to_owned() })
}

// ── Environment files ────────────────────────────────────────────────

/// A Postman environment file for one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvironmentFile {
    pub environment: EnvironmentTag,
    pub name: &'static str,
    /// Short name used in the download notice.
    pub label: &'static str,
    pub description: &'static str,
}

static ENVIRONMENT_FILES: [EnvironmentFile; 2] = [
    EnvironmentFile {
        environment: EnvironmentTag::Uat,
        name: "UAT Environment",
        label: "UAT",
        description: "Configuration for the UAT testing environment.",
    },
    EnvironmentFile {
        environment: EnvironmentTag::Prod,
        name: "Production Environment",
        label: "Production",
        description: "Configuration for the Production environment.",
    },
];

#[must_use]
pub fn environment_files() -> &'static [EnvironmentFile] {
    &ENVIRONMENT_FILES
}

/// The environment file for `tag`.
///
/// # Errors
///
/// Returns [`CatalogError::NoEnvironmentFile`] for the development
/// environment, which is not published.
pub fn environment_file(tag: EnvironmentTag) -> Result<&'static EnvironmentFile, CatalogError> {
    ENVIRONMENT_FILES
        .iter()
        .find(|f| f.environment == tag)
        .ok_or_else(|| CatalogError::NoEnvironmentFile {
            tag: tag.to_string(),
        })
}

// ── API clients ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiClient {
    pub language: &'static str,
    pub description: &'static str,
}

static API_CLIENTS: [ApiClient; 6] = [
    ApiClient { language: "JavaScript", description: "Node.js client" },
    ApiClient { language: "Python", description: "Python client" },
    ApiClient { language: "Java", description: "Java client" },
    ApiClient { language: "C#", description: ".NET client" },
    ApiClient { language: "PHP", description: "PHP client" },
    ApiClient { language: "Ruby", description: "Ruby client" },
];

/// Client libraries offered for download.
#[must_use]
pub fn api_clients() -> &'static [ApiClient] {
    &API_CLIENTS
}

// ── Environment status ───────────────────────────────────────────────

/// Health and metadata for a published environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvironmentProfile {
    pub environment: EnvironmentTag,
    pub name: &'static str,
    pub status: EndpointStatus,
    pub base_url: &'static str,
    pub uptime: &'static str,
    pub latency: &'static str,
    pub api_version: &'static str,
    /// Pre-release notice, shown only where a beta is offered.
    pub beta_notice: Option<&'static str>,
    pub rate_limit_per_minute: u32,
    pub notes: &'static [&'static str],
}

static PROFILES: [EnvironmentProfile; 2] = [
    EnvironmentProfile {
        environment: EnvironmentTag::Uat,
        name: "UAT",
        status: EndpointStatus::Operational,
        base_url: "https://api-uat.loanportal.example",
        uptime: "99.95%",
        latency: "145ms",
        api_version: "v1.0.2 (Stable)",
        beta_notice: Some("Beta v2.0 Available"),
        rate_limit_per_minute: 100,
        notes: &[
            "This environment is for testing purposes only. Do not use real customer data.",
            "Data in this environment is refreshed weekly on Sunday at 00:00 UTC.",
        ],
    },
    EnvironmentProfile {
        environment: EnvironmentTag::Prod,
        name: "Production",
        status: EndpointStatus::Operational,
        base_url: "https://api.loanportal.example",
        uptime: "99.99%",
        latency: "98ms",
        api_version: "v1.0.2 (Stable)",
        beta_notice: None,
        rate_limit_per_minute: 500,
        notes: &[
            "This environment is for live applications and real customer data.",
            "All data submitted to this environment is subject to our security and privacy policies.",
        ],
    },
];

#[must_use]
pub fn profiles() -> &'static [EnvironmentProfile] {
    &PROFILES
}

/// Status profile for `tag`.
///
/// # Errors
///
/// Returns [`CatalogError::NoProfile`] for the development environment.
pub fn profile(tag: EnvironmentTag) -> Result<&'static EnvironmentProfile, CatalogError> {
    PROFILES
        .iter()
        .find(|p| p.environment == tag)
        .ok_or_else(|| CatalogError::NoProfile {
            tag: tag.to_string(),
        })
}

/// A past service disruption or maintenance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Incident {
    pub title: &'static str,
    pub kind: EndpointStatus,
    pub window: &'static str,
    pub summary: &'static str,
    pub resolved: bool,
}

/// Overall platform status with recent incident history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemStatus {
    pub headline: &'static str,
    pub last_updated: &'static str,
    pub incidents: &'static [Incident],
}

static INCIDENTS: [Incident; 2] = [
    Incident {
        title: "Scheduled Maintenance Completed",
        kind: EndpointStatus::Maintenance,
        window: "November 15, 2023, 02:30 AM - 04:00 AM",
        summary: "The scheduled maintenance has been completed successfully. \
                  All systems are now operational.",
        resolved: true,
    },
    Incident {
        title: "Degraded Performance",
        kind: EndpointStatus::DegradedPerformance,
        window: "November 10, 2023, 10:15 AM - 11:45 AM",
        summary: "Some users experienced increased latency with the /applications POST \
                  endpoint. The issue has been resolved.",
        resolved: true,
    },
];

#[must_use]
pub fn system_status() -> SystemStatus {
    SystemStatus {
        headline: "All Systems Operational",
        last_updated: "November 20, 2023, 09:15 AM",
        incidents: &INCIDENTS,
    }
}
