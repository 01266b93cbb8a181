//! Application layer - command handlers composing ports into workflows.

pub mod handlers;
