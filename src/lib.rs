//! Referral Gateway - referral-aware signup and login in front of a managed
//! identity provider.
//!
//! Account creation and credential verification are forwarded to the
//! provider; the workflow this crate owns is validating a referral code,
//! resolving it to a referrer, and recording the referral edge exactly once
//! per new account.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
