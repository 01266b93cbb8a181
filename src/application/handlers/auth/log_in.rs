//! LogInHandler - Command handler for credential verification.
//!
//! A single forwarded call to the identity provider; no local state.

use std::sync::Arc;

use secrecy::Secret;

use crate::domain::foundation::EmailAddress;
use crate::domain::signup::LoginError;
use crate::ports::{Credentials, IdentityError, IdentityProvider};

/// Command to authenticate an existing user.
#[derive(Debug, Clone)]
pub struct LogInCommand {
    pub email: EmailAddress,
    pub password: Secret<String>,
}

/// Handler forwarding authentication to the identity provider.
pub struct LogInHandler {
    identity_provider: Arc<dyn IdentityProvider>,
}

impl LogInHandler {
    pub fn new(identity_provider: Arc<dyn IdentityProvider>) -> Self {
        Self { identity_provider }
    }

    pub async fn handle(&self, cmd: LogInCommand) -> Result<Credentials, LoginError> {
        self.identity_provider
            .authenticate(&cmd.email, &cmd.password)
            .await
            .map_err(|e| match e {
                IdentityError::InvalidCredentials => LoginError::InvalidCredentials,
                // An incomplete token set is a provider contract violation,
                // not a credentials problem.
                other => LoginError::provider(other.to_string()),
            })
    }
}
