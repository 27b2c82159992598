//! Environment tags.
//!
//! Every resource in the registry lives in exactly one environment
//! partition. Tags serialize lowercase and parse case-insensitively, so the
//! `UAT`/`PROD` spelling used by the two-environment pages is accepted too.

use serde::{Deserialize, Serialize};

use crate::error::ParseTagError;

/// Partition key of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentTag {
    Dev,
    Uat,
    Prod,
}

impl EnvironmentTag {
    /// All tags in display order.
    pub const ALL: [Self; 3] = [Self::Dev, Self::Uat, Self::Prod];

    /// Prefix of every secret generated for this environment.
    #[must_use]
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Self::Dev => "loan_pk_dev_",
            Self::Uat => "loan_pk_uat_",
            Self::Prod => "loan_pk_prod_",
        }
    }

    /// Human-readable environment name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dev => "Development",
            Self::Uat => "UAT",
            Self::Prod => "Production",
        }
    }

    /// Lowercase slug, as used in URLs and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Uat => "uat",
            Self::Prod => "prod",
        }
    }
}

impl std::fmt::Display for EnvironmentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnvironmentTag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "uat" => Ok(Self::Uat),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(ParseTagError { tag: s.to_owned() }),
        }
    }
}
