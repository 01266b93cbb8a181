//! HTTP handlers for signup and login endpoints.
//!
//! These handlers connect Axum routes to the application layer handlers.
//! The request body is taken as raw `Bytes` rather than through the `Json`
//! extractor so empty and malformed bodies produce this API's contractual
//! messages instead of the extractor's defaults.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::application::handlers::auth::{
    LogInCommand, LogInHandler, SignUpCommand, SignUpHandler,
};
use crate::domain::signup::{LoginError, SignupError};
use crate::ports::{IdentityProvider, ReferralDirectory};

use super::dto::{ErrorResponse, LoginRequest, LoginResponse, SignupRequest, SignupResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped port objects injected at
/// startup.
#[derive(Clone)]
pub struct AuthAppState {
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub referral_directory: Arc<dyn ReferralDirectory>,
}

impl AuthAppState {
    /// Create handlers on demand from the shared state.
    pub fn sign_up_handler(&self) -> SignUpHandler {
        SignUpHandler::new(
            self.identity_provider.clone(),
            self.referral_directory.clone(),
        )
    }

    pub fn log_in_handler(&self) -> LogInHandler {
        LogInHandler::new(self.identity_provider.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Body Parsing
// ════════════════════════════════════════════════════════════════════════════════

/// Parse and shape-validate a raw request body.
///
/// Empty bodies and JSON that does not fit the DTO both map to 400 with the
/// messages this API contractually returns.
fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    if body.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message_only("Request body is empty")),
        )
            .into_response());
    }

    serde_json::from_slice::<T>(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation_failed(vec![super::dto::FieldError {
                field: "body".to_string(),
                message: e.to_string(),
            }])),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /signup - Register a new user, optionally crediting a referrer.
pub async fn sign_up(State(state): State<AuthAppState>, body: Bytes) -> Response {
    let request: SignupRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let email = match request.validate() {
        Ok(email) => email,
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::validation_failed(errors)),
            )
                .into_response();
        }
    };

    let cmd = SignUpCommand {
        email,
        password: request.password,
        // An empty referralCode means no code was supplied; only a present,
        // non-empty code enters referral processing.
        referral_code: request.referral_code.filter(|code| !code.is_empty()),
    };

    match state.sign_up_handler().handle(cmd).await {
        Ok(outcome) => {
            let response = SignupResponse {
                message: "User registration successful".to_string(),
                // Omitted entirely when no code was supplied.
                referral_applied: outcome.referral_applied.then_some(true),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => SignupApiError(err).into_response(),
    }
}

/// POST /login - Verify credentials and forward the provider's token set.
pub async fn log_in(State(state): State<AuthAppState>, body: Bytes) -> Response {
    let request: LoginRequest = match parse_body(&body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let email = match request.validate() {
        Ok(email) => email,
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::validation_failed(errors)),
            )
                .into_response();
        }
    };

    let cmd = LogInCommand {
        email,
        password: request.password,
    };

    match state.log_in_handler().handle(cmd).await {
        Ok(credentials) => {
            let response = LoginResponse {
                message: "Login successful".to_string(),
                id_token: credentials.id_token,
                access_token: credentials.access_token,
                refresh_token: credentials.refresh_token,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => LoginApiError(err).into_response(),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts signup failures to HTTP responses.
pub struct SignupApiError(pub SignupError);

impl IntoResponse for SignupApiError {
    fn into_response(self) -> Response {
        let message = self.0.message();
        let (status, body) = match &self.0 {
            SignupError::InvalidReferralFormat { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details(message, message),
            ),
            SignupError::ReferralNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::with_details(message, message),
            ),
            SignupError::AccountAlreadyExists { .. } => {
                (StatusCode::CONFLICT, ErrorResponse::message_only(message))
            }
            SignupError::ReferralProcessing { .. } | SignupError::Provider { .. } => {
                // Diagnostic detail goes to the log, never the client.
                tracing::error!(error = %self.0, "signup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::message_only(message),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// API error type that converts login failures to HTTP responses.
pub struct LoginApiError(pub LoginError);

impl IntoResponse for LoginApiError {
    fn into_response(self) -> Response {
        let message = self.0.message();
        let status = match &self.0 {
            LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            LoginError::Provider { .. } => {
                tracing::error!(error = %self.0, "login failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorResponse::message_only(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EmailAddress;

    // ════════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn api_error_maps_invalid_referral_format_to_400() {
        let err = SignupApiError(SignupError::invalid_referral_format("too short"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_referral_not_found_to_404() {
        let err = SignupApiError(SignupError::referral_not_found("ABCD1234"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_maps_account_already_exists_to_409() {
        let email = EmailAddress::try_new("a@x.com").unwrap();
        let err = SignupApiError(SignupError::account_already_exists(email));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn api_error_maps_provider_error_to_500() {
        let err = SignupApiError(SignupError::provider("connection refused"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_maps_referral_processing_to_500() {
        let err = SignupApiError(SignupError::referral_processing("store down"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn login_error_maps_invalid_credentials_to_401() {
        let err = LoginApiError(LoginError::InvalidCredentials);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn login_error_maps_provider_error_to_500() {
        let err = LoginApiError(LoginError::provider("timeout"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
