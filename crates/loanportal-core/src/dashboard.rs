//! Per-environment overview figures.

use serde::Serialize;

use crate::environment::EnvironmentTag;
use crate::models::EndpointStatus;
use crate::registry::EnvironmentRegistry;

/// Traffic figures shown on the overview. Usage is not metered, so these
/// are fixed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageMetrics {
    /// API calls over the last 7 days.
    pub api_calls_7d: u64,
    pub avg_response: &'static str,
    /// Success rate over the last 30 days.
    pub success_rate_30d: &'static str,
}

pub const USAGE: UsageMetrics = UsageMetrics {
    api_calls_7d: 257,
    avg_response: "124ms",
    success_rate_30d: "99.8%",
};

/// Counts derived from one environment's resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub environment: EnvironmentTag,
    pub api_keys: usize,
    pub ip_entries: usize,
    pub active_webhooks: usize,
    pub webhooks: usize,
    pub operational_endpoints: usize,
    pub endpoints: usize,
    pub usage: UsageMetrics,
}

impl DashboardSummary {
    /// Summarise `tag`. An environment with no partition reports zeros.
    #[must_use]
    pub fn from_registry(registry: &EnvironmentRegistry, tag: EnvironmentTag) -> Self {
        let res = registry.get(tag);
        Self {
            environment: tag,
            api_keys: res.api_keys.len(),
            ip_entries: res.ip_entries.len(),
            active_webhooks: res.webhooks.iter().filter(|w| w.active).count(),
            webhooks: res.webhooks.len(),
            operational_endpoints: res
                .endpoints
                .iter()
                .filter(|e| e.status == EndpointStatus::Operational)
                .count(),
            endpoints: res.endpoints.len(),
            usage: USAGE,
        }
    }
}
