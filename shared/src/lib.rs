//! Shared utilities and common types for the Signa server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Response structures shared by the API boundary
//! - Validation utilities (email, phone, verification code formats)

pub mod config;
pub mod types;
pub mod utils;

pub use config::{Environment, ServerConfig};
pub use types::response::{ErrorResponse, FieldErrors};
pub use utils::validation;
