//! MySQL repository implementations

mod account_repository_impl;
mod challenge_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use challenge_repository_impl::MySqlChallengeRepository;
