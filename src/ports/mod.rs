//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IdentityProvider` - account creation and credential verification
//!   against the external identity system
//! - `ReferralDirectory` - referral code resolution and referral recording
//!   against the persistent referral store

mod identity_provider;
mod referral_directory;

pub use identity_provider::{Credentials, IdentityError, IdentityProvider};
pub use referral_directory::{DirectoryError, RecordOutcome, ReferralDirectory};
