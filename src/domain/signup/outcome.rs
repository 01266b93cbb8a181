//! Signup outcome type.

use crate::domain::foundation::AccountId;

/// Successful result of the signup workflow.
///
/// Failures are carried by `SignupError`; together the two form the closed
/// set of outcomes a signup can have, so callers handle every kind
/// exhaustively instead of inspecting strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    /// The account created in the identity provider.
    pub account_id: AccountId,
    /// Whether a referral was resolved and recorded for this signup.
    /// `false` means no referral code was supplied; a supplied-but-failing
    /// code never reaches a success outcome.
    pub referral_applied: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_carries_referral_flag() {
        let outcome = SignupOutcome {
            account_id: AccountId::new("usr_1").unwrap(),
            referral_applied: true,
        };
        assert!(outcome.referral_applied);
    }
}
