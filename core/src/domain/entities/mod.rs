//! Domain entities

pub mod account;
pub mod challenge;

pub use account::Account;
pub use challenge::{ChannelKind, VerificationChallenge};
