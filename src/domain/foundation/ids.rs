//! Strongly-typed identifier value objects.
//!
//! Identifiers issued by the external identity provider are opaque strings
//! (provider subjects), not UUIDs we mint ourselves, so these wrap `String`
//! and only enforce non-emptiness.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Identifier of an account in the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an AccountId from a provider-issued identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("account_id"));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the account that owns a referral code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferrerId(String);

impl ReferrerId {
    /// Creates a ReferrerId from a provider-issued identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("referrer_id"));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferrerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_accepts_non_empty() {
        let id = AccountId::new("usr_12345").unwrap();
        assert_eq!(id.as_str(), "usr_12345");
    }

    #[test]
    fn account_id_rejects_empty() {
        assert!(AccountId::new("").is_err());
    }

    #[test]
    fn referrer_id_accepts_non_empty() {
        let id = ReferrerId::new("usr_referrer").unwrap();
        assert_eq!(id.to_string(), "usr_referrer");
    }

    #[test]
    fn referrer_id_rejects_empty() {
        assert!(ReferrerId::new("").is_err());
    }
}
