//! Verification engine: the one-time-code lifecycle for contact channels
//!
//! This module owns challenge issuance, confirmation against expiry and
//! usage state, and resend with hard invalidation of the prior code.

mod config;
mod engine;
mod traits;

#[cfg(test)]
pub mod tests;

pub use config::VerificationConfig;
pub use engine::VerificationEngine;
pub use traits::{DispatchError, NotificationGateway};
