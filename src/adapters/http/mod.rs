//! HTTP adapters - REST API implementations.

pub mod auth;

// Re-export key types for convenience
pub use auth::auth_router;
pub use auth::AuthAppState;
