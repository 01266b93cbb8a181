//! SignUpHandler - Command handler for the referral-aware signup workflow.
//!
//! Sequence per request:
//!
//! 1. Validate referral code format, if one was supplied. This runs before
//!    account creation so a malformed code never leaves an orphaned account
//!    behind in the identity provider.
//! 2. Create the account via the identity provider. Never retried here:
//!    account creation is not safely idempotent without provider-side dedup.
//! 3. Without a code, finish with `referral_applied: false`.
//! 4. Resolve the code to a referrer; unknown codes fail with
//!    `ReferralNotFound` and the already-created account stays.
//! 5. Record the referral edge. A failure here is a partial success: the
//!    account exists, the credit does not. No rollback across the two
//!    backends; the condition is logged for manual reconciliation and
//!    reported as `ReferralProcessing`.

use std::sync::Arc;

use secrecy::Secret;

use crate::domain::foundation::EmailAddress;
use crate::domain::signup::{ReferralCode, SignupError, SignupOutcome};
use crate::ports::{IdentityError, IdentityProvider, RecordOutcome, ReferralDirectory};

/// Command to sign up a new user, optionally with a referral code.
#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub email: EmailAddress,
    pub password: Secret<String>,
    pub referral_code: Option<String>,
}

/// Handler orchestrating account creation and referral processing.
pub struct SignUpHandler {
    identity_provider: Arc<dyn IdentityProvider>,
    referral_directory: Arc<dyn ReferralDirectory>,
}

impl SignUpHandler {
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        referral_directory: Arc<dyn ReferralDirectory>,
    ) -> Self {
        Self {
            identity_provider,
            referral_directory,
        }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<SignupOutcome, SignupError> {
        // 1. Format-check the referral code before touching the provider.
        let referral_code = match cmd.referral_code.as_deref() {
            Some(raw) => Some(
                ReferralCode::try_new(raw)
                    .map_err(|e| SignupError::invalid_referral_format(e.to_string()))?,
            ),
            None => None,
        };

        // 2. Create the account, forwarding the code as an attribute.
        let account_id = self
            .identity_provider
            .create_account(&cmd.email, &cmd.password, referral_code.as_ref())
            .await
            .map_err(|e| match e {
                IdentityError::AlreadyExists => {
                    SignupError::account_already_exists(cmd.email.clone())
                }
                other => SignupError::provider(other.to_string()),
            })?;

        tracing::info!(email = %cmd.email, account_id = %account_id, "account created");

        // 3. No code: done.
        let Some(code) = referral_code else {
            return Ok(SignupOutcome {
                account_id,
                referral_applied: false,
            });
        };

        // 4. Resolve the code to its owning referrer.
        let referrer = self
            .referral_directory
            .find_referrer_by_code(&code)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %cmd.email, code = %code, error = %e,
                    "referral lookup failed after account creation"
                );
                SignupError::referral_processing(e.to_string())
            })?
            .ok_or_else(|| SignupError::referral_not_found(code.as_str()))?;

        // 5. Record the edge; referred email is the idempotency key.
        match self
            .referral_directory
            .record_referral(&referrer, &cmd.email)
            .await
        {
            Ok(RecordOutcome::Recorded) => {}
            Ok(RecordOutcome::AlreadyRecorded) => {
                tracing::error!(
                    email = %cmd.email, referrer = %referrer,
                    "referral already recorded for a freshly created account"
                );
                return Err(SignupError::referral_processing(
                    "referral already recorded for this email",
                ));
            }
            Err(e) => {
                tracing::error!(
                    email = %cmd.email, referrer = %referrer, error = %e,
                    "referral recording failed after account creation"
                );
                return Err(SignupError::referral_processing(e.to_string()));
            }
        }

        tracing::info!(email = %cmd.email, referrer = %referrer, "referral recorded");

        Ok(SignupOutcome {
            account_id,
            referral_applied: true,
        })
    }
}
