//! Application command handlers.

pub mod auth;
