//! Error types for `loanportal-core`.
//!
//! Validation failures are always recoverable: the operation is rejected,
//! the registry is left untouched, and the caller may retry with new input.

/// Rejected user input. The registry is never modified when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// API key name was blank.
    #[error("empty name")]
    EmptyName,

    /// IP address was blank.
    #[error("empty address")]
    EmptyAddress,

    /// IP address did not match the dotted-quad syntax.
    #[error("invalid format")]
    InvalidIpFormat,

    /// Webhook URL was blank.
    #[error("empty url")]
    EmptyUrl,

    /// Webhook URL could not be parsed or has no host.
    #[error("malformed url")]
    MalformedUrl,

    /// The comma-separated event list had no non-empty entries.
    #[error("no events")]
    NoEvents,
}

impl ValidationError {
    /// User-facing text shown in the error notification.
    #[must_use]
    pub const fn notice(&self) -> &'static str {
        match self {
            Self::EmptyName => "Please enter a name for your API key",
            Self::EmptyAddress => "Please enter an IP address",
            Self::InvalidIpFormat => "Please enter a valid IP address",
            Self::EmptyUrl => "Please enter a webhook URL",
            Self::MalformedUrl => "Please enter a valid URL",
            Self::NoEvents => "Please enter at least one event",
        }
    }
}

/// An environment tag string that names no known environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment: {tag}")]
pub struct ParseTagError {
    pub tag: String,
}

/// Errors from catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No collection with this id.
    #[error("collection not found: {id}")]
    CollectionNotFound { id: String },

    /// No documentation section with this id.
    #[error("documentation section not found: {id}")]
    SectionNotFound { id: String },

    /// The environment has no status profile (only UAT and Production do).
    #[error("no status profile for environment: {tag}")]
    NoProfile { tag: String },

    /// The environment has no downloadable environment file.
    #[error("no environment file for environment: {tag}")]
    NoEnvironmentFile { tag: String },
}
