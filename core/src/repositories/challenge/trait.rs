//! Challenge repository trait: persistence contract for verification challenges.
//!
//! The store keeps at most one challenge per `(channel, channel_value)`
//! and enforces it with a uniqueness constraint on the channel value.
//! Every read hits the store; results are never cached, so a confirm
//! racing a reissue observes the delete and fails cleanly.

use async_trait::async_trait;

use crate::domain::entities::{ChannelKind, VerificationChallenge};
use crate::errors::DomainError;

/// Repository contract for verification challenge persistence
#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    /// Find the live challenge for a channel, regardless of code
    async fn find_by_channel(
        &self,
        channel: ChannelKind,
        channel_value: &str,
    ) -> Result<Option<VerificationChallenge>, DomainError>;

    /// Find the live challenge matching both channel and code.
    ///
    /// The joint lookup is what keeps confirmation non-enumerating: a
    /// miss does not reveal whether the channel or the code was wrong.
    async fn find_by_channel_and_code(
        &self,
        channel: ChannelKind,
        channel_value: &str,
        code: &str,
    ) -> Result<Option<VerificationChallenge>, DomainError>;

    /// Persist a new challenge.
    ///
    /// Fails with `DuplicateChannel` if a live challenge already exists
    /// for this channel value.
    async fn create(
        &self,
        challenge: VerificationChallenge,
    ) -> Result<VerificationChallenge, DomainError>;

    /// Update an existing challenge (used to mark it verified)
    async fn update(
        &self,
        challenge: VerificationChallenge,
    ) -> Result<VerificationChallenge, DomainError>;

    /// Delete the challenge for a channel, returning whether one existed
    async fn delete_by_channel(
        &self,
        channel: ChannelKind,
        channel_value: &str,
    ) -> Result<bool, DomainError>;
}
