//! Shared value objects used across the domain.

mod email;
mod errors;
mod ids;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use ids::{AccountId, ReferrerId};
