//! Error recovery at the API boundary

pub mod error;

pub use error::{domain_error_response, validator_error_response};
