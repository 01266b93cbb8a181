//! HTTP DTOs (Data Transfer Objects) for signup and login endpoints.
//!
//! These types define the JSON request/response structure for the auth API.
//! They serve as the boundary between HTTP and the application layer.

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::EmailAddress;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to sign up a new user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Email address, the account key.
    pub email: String,
    /// Password, forwarded to the identity provider and never persisted.
    pub password: Secret<String>,
    /// Optional referral code crediting an existing user.
    #[serde(default)]
    pub referral_code: Option<String>,
}

/// Request to authenticate an existing user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

/// A single field-level validation failure in a 400 response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SignupRequest {
    /// Validates the request shape, returning the parsed email on success
    /// or every field failure at once.
    ///
    /// Referral code format is NOT checked here; that is the orchestrator's
    /// first step and yields the dedicated `InvalidReferralFormat` outcome
    /// rather than a generic validation error.
    pub fn validate(&self) -> Result<EmailAddress, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = match EmailAddress::try_new(&self.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(FieldError::new("email", e.to_string()));
                None
            }
        };

        if self.password.expose_secret().is_empty() {
            errors.push(FieldError::new("password", "Field 'password' cannot be empty"));
        }

        match email {
            Some(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

impl LoginRequest {
    /// Validates the request shape, mirroring `SignupRequest::validate`.
    pub fn validate(&self) -> Result<EmailAddress, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = match EmailAddress::try_new(&self.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(FieldError::new("email", e.to_string()));
                None
            }
        };

        if self.password.expose_secret().is_empty() {
            errors.push(FieldError::new("password", "Field 'password' cannot be empty"));
        }

        match email {
            Some(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Success response for signup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    /// Present only when a referral code was supplied with the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_applied: Option<bool>,
}

/// Success response for login, forwarding the provider's token set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Error response body shared by all non-2xx statuses.
///
/// `errors` carries field-level validation failures (400 only); `details`
/// carries the domain message for user-correctable failures. Neither is
/// ever populated for 500-class responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// A bare message with no supplementary fields.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            details: None,
        }
    }

    /// A validation failure carrying field errors.
    pub fn validation_failed(errors: Vec<FieldError>) -> Self {
        Self {
            message: "Validation failed".to_string(),
            errors: Some(errors),
            details: None,
        }
    }

    /// A domain failure exposing its message as `details`.
    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            details: Some(details.into()),
        }
    }
}
