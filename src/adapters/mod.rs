//! Adapters - implementations of ports against concrete infrastructure.

pub mod http;
pub mod identity;
pub mod postgres;
