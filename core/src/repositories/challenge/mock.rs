//! In-memory implementation of ChallengeRepository for tests and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{ChannelKind, VerificationChallenge};
use crate::errors::{DomainError, VerificationError};

use super::trait_::ChallengeRepository;

/// In-memory challenge store, keyed by `(channel, channel_value)` to
/// mirror the per-kind tables with a unique index on the channel value.
#[derive(Clone)]
pub struct MockChallengeRepository {
    challenges: Arc<RwLock<HashMap<(ChannelKind, String), VerificationChallenge>>>,
}

impl MockChallengeRepository {
    pub fn new() -> Self {
        Self {
            challenges: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Test helper: overwrite a stored challenge, e.g. to backdate `created_at`
    pub async fn put(&self, challenge: VerificationChallenge) {
        let mut challenges = self.challenges.write().await;
        challenges.insert(
            (challenge.channel, challenge.channel_value.clone()),
            challenge,
        );
    }
}

impl Default for MockChallengeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChallengeRepository for MockChallengeRepository {
    async fn find_by_channel(
        &self,
        channel: ChannelKind,
        channel_value: &str,
    ) -> Result<Option<VerificationChallenge>, DomainError> {
        let challenges = self.challenges.read().await;
        Ok(challenges
            .get(&(channel, channel_value.to_string()))
            .cloned())
    }

    async fn find_by_channel_and_code(
        &self,
        channel: ChannelKind,
        channel_value: &str,
        code: &str,
    ) -> Result<Option<VerificationChallenge>, DomainError> {
        let challenges = self.challenges.read().await;
        Ok(challenges
            .get(&(channel, channel_value.to_string()))
            .filter(|c| c.code == code)
            .cloned())
    }

    async fn create(
        &self,
        challenge: VerificationChallenge,
    ) -> Result<VerificationChallenge, DomainError> {
        let mut challenges = self.challenges.write().await;
        let key = (challenge.channel, challenge.channel_value.clone());

        if challenges.contains_key(&key) {
            return Err(VerificationError::DuplicateChannel {
                channel: challenge.channel,
            }
            .into());
        }

        challenges.insert(key, challenge.clone());
        Ok(challenge)
    }

    async fn update(
        &self,
        challenge: VerificationChallenge,
    ) -> Result<VerificationChallenge, DomainError> {
        let mut challenges = self.challenges.write().await;
        let key = (challenge.channel, challenge.channel_value.clone());

        if !challenges.contains_key(&key) {
            return Err(VerificationError::NotFound {
                resource: "Verification challenge".to_string(),
            }
            .into());
        }

        challenges.insert(key, challenge.clone());
        Ok(challenge)
    }

    async fn delete_by_channel(
        &self,
        channel: ChannelKind,
        channel_value: &str,
    ) -> Result<bool, DomainError> {
        let mut challenges = self.challenges.write().await;
        Ok(challenges
            .remove(&(channel, channel_value.to_string()))
            .is_some())
    }
}
