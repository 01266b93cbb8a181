//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `REFERRAL_GATEWAY` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use referral_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod identity;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use identity::IdentityConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL referral store)
    pub database: DatabaseConfig,

    /// Identity provider configuration (Zitadel)
    pub identity: IdentityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `REFERRAL_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `REFERRAL_GATEWAY__DATABASE__URL=...` -> `database.url = ...`
    /// - `REFERRAL_GATEWAY__IDENTITY__AUTHORITY=...` -> `identity.authority = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REFERRAL_GATEWAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.identity.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "REFERRAL_GATEWAY__DATABASE__URL",
            "postgresql://test@localhost/referrals",
        );
        env::set_var(
            "REFERRAL_GATEWAY__IDENTITY__AUTHORITY",
            "https://auth.example.com",
        );
        env::set_var("REFERRAL_GATEWAY__IDENTITY__CLIENT_ID", "client-id");
        env::set_var("REFERRAL_GATEWAY__IDENTITY__SERVICE_TOKEN", "svc-token");
    }

    fn clear_env() {
        env::remove_var("REFERRAL_GATEWAY__DATABASE__URL");
        env::remove_var("REFERRAL_GATEWAY__IDENTITY__AUTHORITY");
        env::remove_var("REFERRAL_GATEWAY__IDENTITY__CLIENT_ID");
        env::remove_var("REFERRAL_GATEWAY__IDENTITY__SERVICE_TOKEN");
        env::remove_var("REFERRAL_GATEWAY__SERVER__PORT");
        env::remove_var("REFERRAL_GATEWAY__SERVER__ENVIRONMENT");
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/referrals");
        assert_eq!(config.identity.authority, "https://auth.example.com");
    }

    #[test]
    fn minimal_config_passes_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn server_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(!config.is_production());
    }

    #[test]
    fn environment_override_is_honored() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("REFERRAL_GATEWAY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }
}
