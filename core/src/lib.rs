//! # Signa Core
//!
//! Core business logic and domain layer for the Signa backend.
//! This crate contains the domain entities, the verification engine,
//! repository interfaces, and error types that form the foundation of
//! the registration and contact-verification flow.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
