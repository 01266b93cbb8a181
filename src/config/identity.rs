//! Identity provider configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ConfigValidationError;
use super::server::Environment;

/// Identity provider configuration (Zitadel)
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Zitadel authority URL
    pub authority: String,

    /// OAuth2 client ID used for the password grant
    pub client_id: String,

    /// Service token authorizing management API calls
    pub service_token: Secret<String>,
}

impl IdentityConfig {
    /// Validate identity provider configuration
    ///
    /// In production, requires HTTPS for the authority URL.
    /// In development, allows localhost with HTTP/HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ConfigValidationError> {
        if self.authority.is_empty() {
            return Err(ConfigValidationError::MissingRequired("IDENTITY_AUTHORITY"));
        }
        if self.client_id.is_empty() {
            return Err(ConfigValidationError::MissingRequired("IDENTITY_CLIENT_ID"));
        }

        if *environment == Environment::Production && !self.authority.starts_with("https://") {
            return Err(ConfigValidationError::AuthorityMustBeHttps);
        }

        Ok(())
    }
}
