//! Axum router configuration for auth endpoints.

use axum::{routing::post, Router};

use super::handlers::{log_in, sign_up, AuthAppState};

/// Create the auth API router.
///
/// # Routes
///
/// - `POST /signup` - Register a new user, optionally with a referral code
/// - `POST /login` - Verify credentials against the identity provider
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use referral_gateway::adapters::http::{auth_router, AuthAppState};
///
/// let app_state = AuthAppState { /* ... */ };
/// let app = auth_router().with_state(app_state);
/// ```
pub fn auth_router() -> Router<AuthAppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(log_in))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::identity::MockIdentityProvider;
    use crate::domain::foundation::{EmailAddress, ReferrerId};
    use crate::domain::signup::ReferralCode;
    use crate::ports::{DirectoryError, RecordOutcome, ReferralDirectory};
    use async_trait::async_trait;

    struct NoopDirectory;

    #[async_trait]
    impl ReferralDirectory for NoopDirectory {
        async fn find_referrer_by_code(
            &self,
            _code: &ReferralCode,
        ) -> Result<Option<ReferrerId>, DirectoryError> {
            Ok(None)
        }

        async fn record_referral(
            &self,
            _referrer: &ReferrerId,
            _referred_email: &EmailAddress,
        ) -> Result<RecordOutcome, DirectoryError> {
            Ok(RecordOutcome::Recorded)
        }
    }

    #[test]
    fn auth_router_creates_router() {
        let state = AuthAppState {
            identity_provider: Arc::new(MockIdentityProvider::new()),
            referral_directory: Arc::new(NoopDirectory),
        };
        let router = auth_router();
        let _: Router<()> = router.with_state(state);
    }
}
