//! One-time API key generation.
//!
//! A secret is the environment prefix followed by eight random alphanumeric
//! characters. It is handed to the caller exactly once as a
//! [`OneTimeSecret`], which zeroizes its buffer on drop and never prints its
//! value through `Debug`. Only the redacted form from [`redact`] is stored.
//!
//! These keys are display tokens for the portal, not credentials: nothing
//! verifies them server-side.

use rand::Rng;
use rand::distributions::Alphanumeric;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::environment::EnvironmentTag;

/// Number of random characters after the environment prefix.
pub const RANDOM_SUFFIX_LEN: usize = 8;

/// Number of trailing characters hidden by [`redact`].
pub const REDACTED_TAIL_LEN: usize = 4;

const MASK: &str = "****";

/// A freshly generated secret. Shown once, then dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct OneTimeSecret(String);

impl OneTimeSecret {
    /// The full secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for OneTimeSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OneTimeSecret").field(&"[redacted]").finish()
    }
}

/// Generate a new secret for `tag`.
#[must_use]
pub fn generate_secret(tag: EnvironmentTag) -> OneTimeSecret {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(char::from)
        .collect();
    OneTimeSecret(format!("{}{suffix}", tag.key_prefix()))
}

/// Replace the last four characters of `secret` with `****`.
///
/// Secrets shorter than four characters are masked entirely.
#[must_use]
pub fn redact(secret: &str) -> String {
    let keep = secret.chars().count().saturating_sub(REDACTED_TAIL_LEN);
    let mut out: String = secret.chars().take(keep).collect();
    out.push_str(MASK);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_has_prefix_and_random_suffix() {
        for tag in EnvironmentTag::ALL {
            let secret = generate_secret(tag);
            let value = secret.expose();
            assert!(value.starts_with(tag.key_prefix()));
            let suffix = &value[tag.key_prefix().len()..];
            assert_eq!(suffix.len(), RANDOM_SUFFIX_LEN);
            assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn consecutive_secrets_differ() {
        let a = generate_secret(EnvironmentTag::Uat);
        let b = generate_secret(EnvironmentTag::Uat);
        assert_ne!(a, b);
    }

    #[test]
    fn redact_masks_last_four_chars() {
        assert_eq!(redact("loan_pk_uat_aK7hQ2xZ"), "loan_pk_uat_aK7h****");
    }

    #[test]
    fn redact_keeps_length() {
        let secret = generate_secret(EnvironmentTag::Prod);
        assert_eq!(redact(secret.expose()).len(), secret.expose().len());
    }

    #[test]
    fn redact_short_input_is_fully_masked() {
        assert_eq!(redact("ab"), "****");
        assert_eq!(redact(""), "****");
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let secret = generate_secret(EnvironmentTag::Dev);
        let printed = format!("{secret:?}");
        assert!(!printed.contains(secret.expose()));
    }
}
