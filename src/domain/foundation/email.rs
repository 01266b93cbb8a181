//! Email address value object.
//!
//! Accounts are keyed by email, case-insensitively. Construction normalizes
//! to lowercase so two spellings of the same address compare equal and hit
//! the same idempotency key in the referral store.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A syntactically plausible, lowercase-normalized email address.
///
/// This is a boundary sanity check, not RFC 5321 validation; the identity
/// provider remains the authority on deliverability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates an EmailAddress from a string, validating basic shape.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the input is empty, contains whitespace,
    /// or does not have exactly one `@` with non-empty local and domain parts.
    pub fn try_new(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "email",
                "must not contain whitespace",
            ));
        }
        let mut parts = raw.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format(
                "email",
                "expected local@domain",
            ));
        }

        Ok(Self(raw.to_lowercase()))
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
