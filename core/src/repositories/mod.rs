pub mod account;
pub mod challenge;

pub use account::{AccountRepository, MockAccountRepository};
pub use challenge::{ChallengeRepository, MockChallengeRepository};
