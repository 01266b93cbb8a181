//! Identity provider adapters.

mod mock;
mod zitadel;

pub use mock::MockIdentityProvider;
pub use zitadel::{ZitadelConfig, ZitadelIdentityProvider};
