//! Business services

pub mod registration;
pub mod verification;
