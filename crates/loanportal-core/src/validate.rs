//! Input validators.
//!
//! Pure functions with no side effects. The boolean forms answer a yes/no
//! question; the `require_*` forms return the [`ValidationError`] the
//! operations surface. None of them panic on malformed input.
//!
//! The IPv4 check is syntactic only: octet ranges are not enforced, so
//! `999.999.999.999` is accepted.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::error::ValidationError;

const IPV4_SYNTAX: &str = r"^(\d{1,3}\.){3}\d{1,3}$";

fn ipv4_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IPV4_SYNTAX).ok()).as_ref()
}

/// True when `s` has at least one non-whitespace character.
#[must_use]
pub fn is_non_empty(s: &str) -> bool {
    !s.trim().is_empty()
}

/// True when `s` is four dot-separated groups of one to three digits.
#[must_use]
pub fn is_ipv4_syntax(s: &str) -> bool {
    ipv4_regex().is_some_and(|re| re.is_match(s))
}

/// True when `s` parses as an absolute URL with a host.
#[must_use]
pub fn is_parseable_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.has_host())
}

/// Require a non-blank API key name.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] if `name` is blank.
pub fn require_name(name: &str) -> Result<(), ValidationError> {
    if is_non_empty(name) {
        Ok(())
    } else {
        Err(ValidationError::EmptyName)
    }
}

/// Require a non-blank, dotted-quad IP address.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyAddress`] if `address` is blank, or
/// [`ValidationError::InvalidIpFormat`] if it fails the syntax check.
pub fn require_ipv4(address: &str) -> Result<(), ValidationError> {
    if !is_non_empty(address) {
        return Err(ValidationError::EmptyAddress);
    }
    if !is_ipv4_syntax(address) {
        return Err(ValidationError::InvalidIpFormat);
    }
    Ok(())
}

/// Require a non-blank URL with a scheme and a host.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyUrl`] if `url` is blank, or
/// [`ValidationError::MalformedUrl`] if it does not parse.
pub fn require_url(url: &str) -> Result<(), ValidationError> {
    if !is_non_empty(url) {
        return Err(ValidationError::EmptyUrl);
    }
    if !is_parseable_url(url) {
        return Err(ValidationError::MalformedUrl);
    }
    Ok(())
}

/// Split a comma-separated event list, trimming each token and dropping
/// empty ones. Order is preserved.
///
/// # Errors
///
/// Returns [`ValidationError::NoEvents`] if nothing is left.
pub fn parse_events(csv: &str) -> Result<Vec<String>, ValidationError> {
    let events: Vec<String> = csv
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_owned)
        .collect();

    if events.is_empty() {
        Err(ValidationError::NoEvents)
    } else {
        Ok(events)
    }
}
