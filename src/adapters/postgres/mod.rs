//! PostgreSQL adapters.

mod referral_directory;

pub use referral_directory::PostgresReferralDirectory;
