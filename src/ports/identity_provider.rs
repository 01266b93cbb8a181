//! Identity provider port for account creation and credential verification.
//!
//! The identity provider is an external system of record for accounts and
//! credentials. This service never implements those operations itself; it
//! forwards them through this port and classifies the provider's answers
//! into structured error kinds.

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::foundation::{AccountId, EmailAddress};
use crate::domain::signup::ReferralCode;

/// Token set returned by a successful authentication.
///
/// All three tokens are mandatory. An adapter must not paper over a missing
/// token with an empty string; that masks a provider contract violation and
/// is reported as `IdentityError::MalformedResponse` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Errors reported by identity provider adapters.
///
/// Classification must be structural (HTTP status, typed error body), never
/// derived by matching substrings of an error message.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// An account with the given email already exists.
    #[error("account already exists")]
    AlreadyExists,

    /// The email/password pair was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The provider answered, but not with the shape its contract promises.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The provider was unreachable, timed out, or failed internally.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Creates accounts and verifies credentials against the identity provider.
///
/// # Contract
///
/// Implementations must:
/// - Return `IdentityError::AlreadyExists` when the provider reports a
///   duplicate email on `create_account`
/// - Return `IdentityError::InvalidCredentials` when `authenticate` is
///   rejected for bad credentials
/// - Return `IdentityError::Unavailable` for transport failures and
///   timeouts, so a stuck request surfaces instead of hanging
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account, optionally attaching the referral code as an
    /// account attribute.
    ///
    /// Not safely idempotent; callers must not retry this automatically.
    async fn create_account(
        &self,
        email: &EmailAddress,
        password: &Secret<String>,
        referral_code: Option<&ReferralCode>,
    ) -> Result<AccountId, IdentityError>;

    /// Verify credentials and return the provider's token set.
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &Secret<String>,
    ) -> Result<Credentials, IdentityError>;
}
