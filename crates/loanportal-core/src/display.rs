//! Presentation helpers: badge colours and date formatting.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::environment::EnvironmentTag;
use crate::models::{EndpointStatus, HttpMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Blue,
    Green,
    Amber,
    Purple,
    Red,
    Gray,
}

#[must_use]
pub const fn environment_badge(tag: EnvironmentTag) -> BadgeColor {
    match tag {
        EnvironmentTag::Dev => BadgeColor::Blue,
        EnvironmentTag::Uat => BadgeColor::Amber,
        EnvironmentTag::Prod => BadgeColor::Green,
    }
}

#[must_use]
pub const fn method_badge(method: HttpMethod) -> BadgeColor {
    match method {
        HttpMethod::Get => BadgeColor::Blue,
        HttpMethod::Post => BadgeColor::Green,
        HttpMethod::Put => BadgeColor::Amber,
        HttpMethod::Patch => BadgeColor::Purple,
        HttpMethod::Delete => BadgeColor::Red,
    }
}

#[must_use]
pub const fn status_badge(status: EndpointStatus) -> BadgeColor {
    match status {
        EndpointStatus::Operational => BadgeColor::Green,
        EndpointStatus::DegradedPerformance => BadgeColor::Amber,
        EndpointStatus::Maintenance => BadgeColor::Blue,
    }
}

/// `M/D/YYYY`, or "Never used" for a key that has not been used.
#[must_use]
pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(
        || "Never used".to_owned(),
        |at| at.format("%-m/%-d/%Y").to_string(),
    )
}

/// Event names as shown in the webhook table.
#[must_use]
pub fn join_events(events: &[String]) -> String {
    events.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn never_used_key() {
        let prod_key = &seed::registry().get(EnvironmentTag::Prod).api_keys[0];
        assert_eq!(format_date(prod_key.last_used_at), "Never used");
    }

    #[test]
    fn dates_have_no_padding() {
        let dev_key = &seed::registry().get(EnvironmentTag::Dev).api_keys[0];
        assert_eq!(format_date(Some(dev_key.created_at)), "6/12/2023");
        assert_eq!(format_date(dev_key.last_used_at), "11/5/2023");
    }

    #[test]
    fn badges() {
        assert_eq!(environment_badge(EnvironmentTag::Uat), BadgeColor::Amber);
        assert_eq!(method_badge(HttpMethod::Patch), BadgeColor::Purple);
        assert_eq!(method_badge(HttpMethod::Delete), BadgeColor::Red);
        assert_eq!(status_badge(EndpointStatus::Maintenance), BadgeColor::Blue);
    }

    #[test]
    fn events_joined_with_comma_space() {
        let events = vec!["loan.created".to_owned(), "loan.updated".to_owned()];
        assert_eq!(join_events(&events), "loan.created, loan.updated");
        assert_eq!(join_events(&[]), "");
    }
}
