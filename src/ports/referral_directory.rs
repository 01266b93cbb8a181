//! Referral directory port: code resolution and referral recording.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{EmailAddress, ReferrerId};
use crate::domain::signup::ReferralCode;

/// Result of attempting to record a referral edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new referral row was written.
    Recorded,
    /// A referral for this email already exists. Should not occur on a fresh
    /// account, but duplicate invocations from retries must not double-credit.
    AlreadyRecorded,
}

/// Errors reported by referral directory adapters.
///
/// Transient storage failures are surfaced, never swallowed, so the
/// orchestrator can classify them instead of silently dropping a referral
/// credit.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("referral store error: {0}")]
    Storage(String),
}

/// Resolves referral codes to referrers and records referral edges.
///
/// # Contract
///
/// - `find_referrer_by_code` is read-only, idempotent, and safe to retry.
/// - `record_referral` uses the referred email as its idempotency key: the
///   backing store must guarantee that concurrent recordings for the same
///   email produce at most one row, reporting `AlreadyRecorded` to the
///   losers.
#[async_trait]
pub trait ReferralDirectory: Send + Sync {
    /// Look up the account that owns the given referral code.
    async fn find_referrer_by_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<ReferrerId>, DirectoryError>;

    /// Record a referral edge from `referrer` to the new account.
    async fn record_referral(
        &self,
        referrer: &ReferrerId,
        referred_email: &EmailAddress,
    ) -> Result<RecordOutcome, DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal in-memory implementation exercising the contract.
    struct TestDirectory {
        codes: HashMap<String, ReferrerId>,
        referrals: Mutex<HashMap<EmailAddress, ReferrerId>>,
    }

    impl TestDirectory {
        fn with_code(code: &str, referrer: &str) -> Self {
            let mut codes = HashMap::new();
            codes.insert(code.to_string(), ReferrerId::new(referrer).unwrap());
            Self {
                codes,
                referrals: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl ReferralDirectory for TestDirectory {
        async fn find_referrer_by_code(
            &self,
            code: &ReferralCode,
        ) -> Result<Option<ReferrerId>, DirectoryError> {
            Ok(self.codes.get(code.as_str()).cloned())
        }

        async fn record_referral(
            &self,
            referrer: &ReferrerId,
            referred_email: &EmailAddress,
        ) -> Result<RecordOutcome, DirectoryError> {
            let mut referrals = self.referrals.lock().unwrap();
            if referrals.contains_key(referred_email) {
                return Ok(RecordOutcome::AlreadyRecorded);
            }
            referrals.insert(referred_email.clone(), referrer.clone());
            Ok(RecordOutcome::Recorded)
        }
    }

    fn code(s: &str) -> ReferralCode {
        ReferralCode::try_new(s).unwrap()
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::try_new(s).unwrap()
    }

    #[tokio::test]
    async fn lookup_resolves_known_code() {
        let directory = TestDirectory::with_code("ABCD1234", "usr_referrer");
        let found = directory.find_referrer_by_code(&code("ABCD1234")).await.unwrap();
        assert_eq!(found, Some(ReferrerId::new("usr_referrer").unwrap()));
    }

    #[tokio::test]
    async fn lookup_returns_none_for_unknown_code() {
        let directory = TestDirectory::with_code("ABCD1234", "usr_referrer");
        let found = directory.find_referrer_by_code(&code("ZZZZ9999")).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn second_recording_for_same_email_reports_already_recorded() {
        let directory = TestDirectory::with_code("ABCD1234", "usr_referrer");
        let referrer = ReferrerId::new("usr_referrer").unwrap();

        let first = directory
            .record_referral(&referrer, &email("new@x.com"))
            .await
            .unwrap();
        let second = directory
            .record_referral(&referrer, &email("new@x.com"))
            .await
            .unwrap();

        assert_eq!(first, RecordOutcome::Recorded);
        assert_eq!(second, RecordOutcome::AlreadyRecorded);
    }

    #[test]
    fn referral_directory_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn ReferralDirectory) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn ReferralDirectory>>();
    }
}
