//! Signup domain: referral codes, outcome types, and the error taxonomy.

mod errors;
mod outcome;
mod referral_code;

pub use errors::{LoginError, SignupError};
pub use outcome::SignupOutcome;
pub use referral_code::ReferralCode;
