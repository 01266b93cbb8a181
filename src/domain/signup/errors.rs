//! Error taxonomy for the signup and login workflows.
//!
//! Every component raises a specific kind directly; nothing is inferred from
//! error-message text after the fact. The orchestrator never reclassifies a
//! domain failure as infrastructure or vice versa, so the boundary adapter
//! can map kind to HTTP status deterministically.

use thiserror::Error;

use crate::domain::foundation::EmailAddress;

/// Failure kinds of the signup workflow.
///
/// `InvalidReferralFormat`, `ReferralNotFound` and `AccountAlreadyExists`
/// are user-correctable domain failures. `ReferralProcessing` is a partial
/// success: the account exists but the referral credit was not recorded.
/// `Provider` is infrastructure: the identity provider was unreachable or
/// misbehaved.
#[derive(Debug, Clone, Error)]
pub enum SignupError {
    #[error("invalid referral code format: {reason}")]
    InvalidReferralFormat { reason: String },

    #[error("no referrer owns code '{code}'")]
    ReferralNotFound { code: String },

    /// Account creation succeeded but the referral was not recorded. Not
    /// rolled back: the two backends are not transactional. Needs manual
    /// reconciliation, so the orchestrator logs it at error level.
    #[error("referral recording failed after account creation: {reason}")]
    ReferralProcessing { reason: String },

    #[error("account already exists for {email}")]
    AccountAlreadyExists { email: EmailAddress },

    #[error("identity provider error: {reason}")]
    Provider { reason: String },
}

impl SignupError {
    pub fn invalid_referral_format(reason: impl Into<String>) -> Self {
        SignupError::InvalidReferralFormat {
            reason: reason.into(),
        }
    }

    pub fn referral_not_found(code: impl Into<String>) -> Self {
        SignupError::ReferralNotFound { code: code.into() }
    }

    pub fn referral_processing(reason: impl Into<String>) -> Self {
        SignupError::ReferralProcessing {
            reason: reason.into(),
        }
    }

    pub fn account_already_exists(email: EmailAddress) -> Self {
        SignupError::AccountAlreadyExists { email }
    }

    pub fn provider(reason: impl Into<String>) -> Self {
        SignupError::Provider { reason: reason.into() }
    }

    /// The user-facing message for this failure kind.
    ///
    /// 500-class kinds deliberately share a generic message so internal
    /// error text never leaks to clients; the diagnostic detail stays in
    /// the `Display` form used by logs.
    pub fn message(&self) -> &'static str {
        match self {
            SignupError::InvalidReferralFormat { .. } => "Invalid referral code format",
            SignupError::ReferralNotFound { .. } => "Referral code not found",
            SignupError::AccountAlreadyExists { .. } => "Email already in use",
            SignupError::ReferralProcessing { .. } | SignupError::Provider { .. } => {
                "Internal server error"
            }
        }
    }

}

/// Failure kinds of the login workflow.
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("identity provider error: {reason}")]
    Provider { reason: String },
}

impl LoginError {
    pub fn provider(reason: impl Into<String>) -> Self {
        LoginError::Provider { reason: reason.into() }
    }

    /// The user-facing message for this failure kind.
    pub fn message(&self) -> &'static str {
        match self {
            LoginError::InvalidCredentials => "Invalid credentials",
            LoginError::Provider { .. } => "Internal server error",
        }
    }
}
