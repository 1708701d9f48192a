//! Registration orchestrator: account creation plus the first verification challenge

mod service;
mod types;


pub use service::RegistrationService;
pub use types::{RegistrationOutcome, RegistrationRequest};
