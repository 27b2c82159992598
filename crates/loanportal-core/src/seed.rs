//! Startup contents of the registry.
//!
//! Hard-coded literals: one API key, one allow-list entry, and one webhook
//! per environment, plus the same seven endpoint descriptors in each. Ids
//! are numbered from `"1"` within each environment.

use chrono::{DateTime, NaiveDate, Utc};

use crate::environment::EnvironmentTag;
use crate::models::{
    ApiKeyRecord, EndpointDescriptor, EndpointStatus, HttpMethod, IpAllowEntry, WebhookRecord,
};
use crate::registry::{EnvironmentRegistry, ResourceList};

/// Build the seeded registry with all three environments.
#[must_use]
pub fn registry() -> EnvironmentRegistry {
    EnvironmentTag::ALL
        .into_iter()
        .fold(EnvironmentRegistry::with_tags(EnvironmentTag::ALL), |reg, tag| {
            reg.replace(tag, ResourceList::ApiKeys(vec![api_key(tag)]))
                .replace(tag, ResourceList::IpEntries(vec![ip_entry(tag)]))
                .replace(tag, ResourceList::Webhooks(vec![webhook(tag)]))
                .replace(tag, ResourceList::Endpoints(endpoints()))
        })
}

/// Midnight UTC on the given day, or the epoch if the date is invalid.
fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, date)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn api_key(tag: EnvironmentTag) -> ApiKeyRecord {
    let (name, prefix, created_at, last_used_at) = match tag {
        EnvironmentTag::Dev => (
            "Development Key",
            "loan_pk_dev_aK7h",
            day(2023, 6, 12),
            Some(day(2023, 11, 5)),
        ),
        EnvironmentTag::Uat => (
            "Testing Key",
            "loan_pk_uat_bJ9i",
            day(2023, 9, 23),
            Some(day(2023, 11, 30)),
        ),
        EnvironmentTag::Prod => ("Production Key", "loan_pk_prod_cL2m", day(2023, 10, 15), None),
    };

    ApiKeyRecord {
        id: "1".to_owned(),
        name: name.to_owned(),
        secret_prefix: prefix.to_owned(),
        created_at,
        last_used_at,
        environment: tag,
    }
}

fn ip_entry(tag: EnvironmentTag) -> IpAllowEntry {
    let (address, description, created_at) = match tag {
        EnvironmentTag::Dev => ("192.168.1.1", "Office IP", day(2023, 7, 15)),
        EnvironmentTag::Uat => ("203.0.113.1", "Test Environment", day(2023, 9, 10)),
        EnvironmentTag::Prod => ("198.51.100.1", "Production Server", day(2023, 10, 20)),
    };

    IpAllowEntry {
        id: "1".to_owned(),
        address: address.to_owned(),
        description: description.to_owned(),
        created_at,
        environment: tag,
    }
}

fn webhook(tag: EnvironmentTag) -> WebhookRecord {
    let (url, events, active, created_at) = match tag {
        EnvironmentTag::Dev => (
            "https://dev.example.com/webhook",
            &["loan.created", "loan.updated"][..],
            true,
            day(2023, 7, 20),
        ),
        EnvironmentTag::Uat => (
            "https://uat.example.com/webhook",
            &["loan.created", "loan.approved"][..],
            true,
            day(2023, 9, 15),
        ),
        EnvironmentTag::Prod => (
            "https://prod.example.com/webhook",
            &["loan.created", "loan.approved", "loan.disbursed"][..],
            false,
            day(2023, 11, 5),
        ),
    };

    WebhookRecord {
        id: "1".to_owned(),
        url: url.to_owned(),
        events: events.iter().map(|e| (*e).to_owned()).collect(),
        active,
        created_at,
        environment: tag,
    }
}

fn endpoints() -> Vec<EndpointDescriptor> {
    let rows: [(&str, HttpMethod, &str, Option<&str>); 7] = [
        ("/applications", HttpMethod::Get, "120ms", Some("List all applications")),
        ("/applications", HttpMethod::Post, "180ms", Some("Submit a new loan application")),
        ("/applications/{id}", HttpMethod::Get, "95ms", Some("Get details of a specific application")),
        ("/applications/{id}", HttpMethod::Patch, "140ms", Some("Update an existing application")),
        ("/applications/{id}", HttpMethod::Delete, "110ms", Some("Cancel an application")),
        ("/webhooks", HttpMethod::Get, "85ms", None),
        ("/webhooks", HttpMethod::Post, "125ms", None),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (path, method, latency, description))| EndpointDescriptor {
            id: (i + 1).to_string(),
            path: path.to_owned(),
            method,
            status: EndpointStatus::Operational,
            latency: latency.to_owned(),
            description: description.map(str::to_owned),
        })
        .collect()
}
