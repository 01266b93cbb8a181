//! PostgreSQL implementation of ReferralDirectory.
//!
//! Two tables back this adapter:
//!
//! - `referral_codes(code, referrer_id)` - issued codes, written by an
//!   external issuance process; `code` is the primary key, so a code maps
//!   to exactly one referrer
//! - `referrals(referred_email, referrer_id, recorded_at)` - recorded
//!   referral edges; `referred_email` is the primary key, which is the
//!   idempotency guarantee under concurrent signups

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{EmailAddress, ReferrerId};
use crate::domain::signup::ReferralCode;
use crate::ports::{DirectoryError, RecordOutcome, ReferralDirectory};

/// PostgreSQL implementation of the ReferralDirectory port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresReferralDirectory {
    pool: PgPool,
}

impl PostgresReferralDirectory {
    /// Creates a new PostgresReferralDirectory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(context: &str, e: sqlx::Error) -> DirectoryError {
    tracing::error!("{}: {}", context, e);
    DirectoryError::Storage(format!("{}: {}", context, e))
}

#[async_trait]
impl ReferralDirectory for PostgresReferralDirectory {
    async fn find_referrer_by_code(
        &self,
        code: &ReferralCode,
    ) -> Result<Option<ReferrerId>, DirectoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT referrer_id FROM referral_codes WHERE code = $1")
                .bind(code.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage_error("referral code lookup failed", e))?;

        match row {
            Some((referrer_id,)) => {
                let referrer = ReferrerId::new(referrer_id).map_err(|e| {
                    DirectoryError::Storage(format!("invalid referrer_id in store: {}", e))
                })?;
                Ok(Some(referrer))
            }
            None => Ok(None),
        }
    }

    async fn record_referral(
        &self,
        referrer: &ReferrerId,
        referred_email: &EmailAddress,
    ) -> Result<RecordOutcome, DirectoryError> {
        // Insert-if-absent on the referred_email primary key. Of two
        // concurrent signups for the same email, exactly one insert wins;
        // the other observes zero affected rows.
        let result = sqlx::query(
            r#"
            INSERT INTO referrals (referred_email, referrer_id, recorded_at)
            VALUES ($1, $2, now())
            ON CONFLICT (referred_email) DO NOTHING
            "#,
        )
        .bind(referred_email.as_str())
        .bind(referrer.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("referral insert failed", e))?;

        if result.rows_affected() == 1 {
            Ok(RecordOutcome::Recorded)
        } else {
            Ok(RecordOutcome::AlreadyRecorded)
        }
    }
}

impl std::fmt::Debug for PostgresReferralDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresReferralDirectory")
            .finish_non_exhaustive()
    }
}

// Integration tests for this adapter require a live PostgreSQL instance and
// live in tests/ alongside the HTTP integration suite; the port contract
// itself is covered by the in-memory implementation in ports tests.
