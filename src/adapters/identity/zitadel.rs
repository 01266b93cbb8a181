//! Zitadel adapter for account provisioning and credential verification.
//!
//! This adapter implements the `IdentityProvider` port against Zitadel's
//! HTTP APIs:
//!
//! 1. User creation via the management API, with the referral code attached
//!    as user metadata when present
//! 2. Credential verification via the OAuth2 token endpoint (password grant)
//!
//! Failure classification is structural: HTTP status codes and the typed
//! OAuth error field decide the error kind. Error message text is logged
//! but never inspected to classify.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, EmailAddress};
use crate::domain::signup::ReferralCode;
use crate::ports::{Credentials, IdentityError, IdentityProvider};

/// Metadata key under which the referral code is attached to a new user.
const REFERRAL_CODE_METADATA_KEY: &str = "referral_code";

/// Configuration for the Zitadel adapter.
#[derive(Clone)]
pub struct ZitadelConfig {
    /// The authority URL (e.g., "https://auth.example.com")
    pub authority: String,

    /// OAuth2 client ID used for the password grant.
    pub client_id: String,

    /// Service token authorizing management API calls.
    pub service_token: Secret<String>,
}

impl ZitadelConfig {
    /// Create a new configuration with required fields.
    pub fn new(
        authority: impl Into<String>,
        client_id: impl Into<String>,
        service_token: Secret<String>,
    ) -> Self {
        Self {
            authority: authority.into(),
            client_id: client_id.into(),
            service_token,
        }
    }

    /// Management API endpoint for creating human users.
    fn users_url(&self) -> String {
        format!(
            "{}/management/v1/users/human",
            self.authority.trim_end_matches('/')
        )
    }

    /// OAuth2 token endpoint.
    fn token_url(&self) -> String {
        format!("{}/oauth/v2/token", self.authority.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for ZitadelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZitadelConfig")
            .field("authority", &self.authority)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest<'a> {
    user_name: &'a str,
    email: EmailPayload<'a>,
    initial_password: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    metadata: Vec<MetadataEntry<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailPayload<'a> {
    email: &'a str,
    is_email_verified: bool,
}

#[derive(Debug, Serialize)]
struct MetadataEntry<'a> {
    key: &'static str,
    value: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserResponse {
    user_id: String,
}

/// Token endpoint response. Every field is optional at the wire level so a
/// partial answer can be detected and reported as a contract violation
/// instead of a deserialization failure.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// OAuth2 error body (RFC 6749 §5.2).
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Adapter
// ════════════════════════════════════════════════════════════════════════════════

/// Zitadel-backed identity provider.
///
/// This is the production implementation of `IdentityProvider`.
pub struct ZitadelIdentityProvider {
    config: ZitadelConfig,
    http_client: reqwest::Client,
}

impl ZitadelIdentityProvider {
    /// Create a new Zitadel provider.
    pub fn new(config: ZitadelConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn transport_error(context: &str, e: reqwest::Error) -> IdentityError {
        tracing::error!("{}: {}", context, e);
        IdentityError::Unavailable(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl IdentityProvider for ZitadelIdentityProvider {
    async fn create_account(
        &self,
        email: &EmailAddress,
        password: &Secret<String>,
        referral_code: Option<&ReferralCode>,
    ) -> Result<AccountId, IdentityError> {
        let metadata = referral_code
            .map(|code| {
                vec![MetadataEntry {
                    key: REFERRAL_CODE_METADATA_KEY,
                    value: code.as_str(),
                }]
            })
            .unwrap_or_default();

        let request = CreateUserRequest {
            user_name: email.as_str(),
            email: EmailPayload {
                email: email.as_str(),
                is_email_verified: false,
            },
            initial_password: password.expose_secret(),
            metadata,
        };

        let response = self
            .http_client
            .post(self.config.users_url())
            .bearer_auth(self.config.service_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::transport_error("user creation request failed", e))?;

        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(IdentityError::AlreadyExists);
        }
        if !status.is_success() {
            tracing::error!(%status, "user creation returned non-success status");
            return Err(IdentityError::Unavailable(format!(
                "user creation returned {}",
                status
            )));
        }

        let body: CreateUserResponse = response.json().await.map_err(|e| {
            tracing::error!("failed to parse user creation response: {}", e);
            IdentityError::MalformedResponse(format!(
                "user creation response did not parse: {}",
                e
            ))
        })?;

        AccountId::new(body.user_id)
            .map_err(|e| IdentityError::MalformedResponse(format!("empty user id: {}", e)))
    }

    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &Secret<String>,
    ) -> Result<Credentials, IdentityError> {
        let params = [
            ("grant_type", "password"),
            ("username", email.as_str()),
            ("password", password.expose_secret()),
            ("client_id", &self.config.client_id),
            ("scope", "openid offline_access"),
        ];

        let response = self
            .http_client
            .post(self.config.token_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| Self::transport_error("token request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            // The typed OAuth `error` field decides the classification.
            if let Ok(body) = response.json::<OAuthErrorResponse>().await {
                if body.error == "invalid_grant" {
                    return Err(IdentityError::InvalidCredentials);
                }
                tracing::error!(
                    %status,
                    error = %body.error,
                    description = body.error_description.as_deref().unwrap_or(""),
                    "token endpoint rejected request"
                );
                return Err(IdentityError::Unavailable(format!(
                    "token endpoint returned {} ({})",
                    status, body.error
                )));
            }
            tracing::error!(%status, "token endpoint returned non-success status");
            return Err(IdentityError::Unavailable(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            tracing::error!("failed to parse token response: {}", e);
            IdentityError::MalformedResponse(format!("token response did not parse: {}", e))
        })?;

        // All three tokens are required; substituting empty strings for
        // missing ones would mask a provider contract violation.
        match (body.id_token, body.access_token, body.refresh_token) {
            (Some(id_token), Some(access_token), Some(refresh_token))
                if !id_token.is_empty() && !access_token.is_empty() && !refresh_token.is_empty() =>
            {
                Ok(Credentials {
                    id_token,
                    access_token,
                    refresh_token,
                })
            }
            _ => Err(IdentityError::MalformedResponse(
                "token response missing one or more tokens".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for ZitadelIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZitadelIdentityProvider")
            .field("authority", &self.config.authority)
            .field("client_id", &self.config.client_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ZitadelConfig {
        ZitadelConfig::new(
            "https://auth.example.com",
            "my-client",
            Secret::new("tok".to_string()),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_builds_users_url() {
        assert_eq!(
            config().users_url(),
            "https://auth.example.com/management/v1/users/human"
        );
    }

    #[test]
    fn config_builds_token_url() {
        assert_eq!(
            config().token_url(),
            "https://auth.example.com/oauth/v2/token"
        );
    }

    #[test]
    fn config_handles_trailing_slash() {
        let config = ZitadelConfig::new(
            "https://auth.example.com/",
            "my-client",
            Secret::new("tok".to_string()),
        );
        assert_eq!(
            config.token_url(),
            "https://auth.example.com/oauth/v2/token"
        );
    }

    #[test]
    fn config_debug_hides_service_token() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("tok"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Wire Type Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn create_user_request_serializes_metadata_when_present() {
        let request = CreateUserRequest {
            user_name: "a@x.com",
            email: EmailPayload {
                email: "a@x.com",
                is_email_verified: false,
            },
            initial_password: "p",
            metadata: vec![MetadataEntry {
                key: REFERRAL_CODE_METADATA_KEY,
                value: "ABCD1234",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["metadata"][0]["key"], "referral_code");
        assert_eq!(json["metadata"][0]["value"], "ABCD1234");
    }

    #[test]
    fn create_user_request_omits_empty_metadata() {
        let request = CreateUserRequest {
            user_name: "a@x.com",
            email: EmailPayload {
                email: "a@x.com",
                is_email_verified: false,
            },
            initial_password: "p",
            metadata: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn token_response_tolerates_missing_fields() {
        let body: TokenResponse =
            serde_json::from_str(r#"{"access_token":"a","id_token":"i"}"#).unwrap();
        assert!(body.refresh_token.is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Type Safety Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn zitadel_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ZitadelIdentityProvider>();
    }
}
