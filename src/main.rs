//! Referral Gateway server binary.
//!
//! Loads configuration, wires the Zitadel identity provider and PostgreSQL
//! referral directory into the auth router, and serves HTTP.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use referral_gateway::adapters::http::{auth_router, AuthAppState};
use referral_gateway::adapters::identity::{ZitadelConfig, ZitadelIdentityProvider};
use referral_gateway::adapters::postgres::PostgresReferralDirectory;
use referral_gateway::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let identity_provider = ZitadelIdentityProvider::new(ZitadelConfig::new(
        config.identity.authority.clone(),
        config.identity.client_id.clone(),
        config.identity.service_token.clone(),
    ));

    let state = AuthAppState {
        identity_provider: Arc::new(identity_provider),
        referral_directory: Arc::new(PostgresReferralDirectory::new(pool)),
    };

    let app = auth_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "referral gateway listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
