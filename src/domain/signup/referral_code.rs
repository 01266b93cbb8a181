//! Referral code value object.
//!
//! Represents a referral code presented by a new signer-up. A code is an
//! opaque token identifying a referring account; issuance happens elsewhere.
//!
//! # Validation Rules
//!
//! - 8 to 12 characters, inclusive
//! - ASCII letters and digits only (`[A-Za-z0-9]`)
//! - The whole string must match; a valid run embedded in a longer or
//!   otherwise malformed string is rejected

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};

const MIN_LEN: usize = 8;
const MAX_LEN: usize = 12;

/// A format-validated referral code.
///
/// Construction is the only way to obtain a `ReferralCode`, so any value of
/// this type is known to match `[A-Za-z0-9]{8,12}` in full. The check is
/// anchored by construction: the length bound is applied to the entire
/// input and every character is tested, so there is no substring-match
/// escape hatch.
///
/// Codes are case-sensitive and stored verbatim; the directory decides what
/// they resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Creates a ReferralCode from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if:
    /// - Code is empty
    /// - Length is outside [8, 12] characters
    /// - Any character is not an ASCII letter or digit
    pub fn try_new(code: &str) -> Result<Self, ValidationError> {
        if code.is_empty() {
            return Err(ValidationError::empty_field("referral_code"));
        }

        // chars().count() rather than len(): a multi-byte character must not
        // be able to satisfy the length bound with fewer visible characters.
        let char_count = code.chars().count();
        if char_count < MIN_LEN || char_count > MAX_LEN {
            return Err(ValidationError::length_out_of_range(
                "referral_code",
                MIN_LEN,
                MAX_LEN,
                char_count,
            ));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::invalid_format(
                "referral_code",
                "ASCII letters and digits only",
            ));
        }

        Ok(Self(code.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
