//! Mock identity provider for testing and local development.
//!
//! Implements the `IdentityProvider` port against an in-memory account map,
//! avoiding the need for a real provider like Zitadel.
//!
//! # Example
//!
//! ```ignore
//! use referral_gateway::adapters::identity::MockIdentityProvider;
//!
//! let provider = MockIdentityProvider::new()
//!     .with_account("existing@example.com", "hunter2");
//!
//! // A second signup with that email reports AlreadyExists.
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{AccountId, EmailAddress};
use crate::domain::signup::ReferralCode;
use crate::ports::{Credentials, IdentityError, IdentityProvider};

/// Mock identity provider backed by an in-memory account map.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    /// Map of registered email to password.
    accounts: RwLock<HashMap<String, String>>,
    /// Optional error to return for all operations (for error testing).
    force_error: RwLock<Option<IdentityError>>,
}

impl MockIdentityProvider {
    /// Creates a new empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing account.
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.accounts
            .write()
            .unwrap()
            .insert(email.into(), password.into());
        self
    }

    /// Forces all operations to return the specified error.
    pub fn with_error(self, error: IdentityError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Returns the number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.read().unwrap().len()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_account(
        &self,
        email: &EmailAddress,
        password: &Secret<String>,
        _referral_code: Option<&ReferralCode>,
    ) -> Result<AccountId, IdentityError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(email.as_str()) {
            return Err(IdentityError::AlreadyExists);
        }
        accounts.insert(
            email.as_str().to_string(),
            password.expose_secret().clone(),
        );

        AccountId::new(format!("usr_{}", accounts.len()))
            .map_err(|e| IdentityError::MalformedResponse(e.to_string()))
    }

    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &Secret<String>,
    ) -> Result<Credentials, IdentityError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        let accounts = self.accounts.read().unwrap();
        match accounts.get(email.as_str()) {
            Some(stored) if stored == password.expose_secret() => Ok(Credentials {
                id_token: format!("id-token-{}", email),
                access_token: format!("access-token-{}", email),
                refresh_token: format!("refresh-token-{}", email),
            }),
            _ => Err(IdentityError::InvalidCredentials),
        }
    }
}
