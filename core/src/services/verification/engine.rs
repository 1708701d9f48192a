//! Verification engine implementation

use std::sync::Arc;

use crate::domain::entities::{Account, ChannelKind, VerificationChallenge};
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::{AccountRepository, ChallengeRepository};
use sg_shared::validation::{mask_email, mask_phone};

use super::config::VerificationConfig;
use super::traits::{DispatchError, NotificationGateway};

/// Engine for the verification-code lifecycle.
///
/// Per-challenge state machine: `CREATED → VERIFIED` on successful
/// confirmation, `CREATED → INVALIDATED` when a reissue deletes it, or
/// `CREATED → EXPIRED` detected lazily at confirmation. All three end
/// states are terminal.
pub struct VerificationEngine<C, A, N>
where
    C: ChallengeRepository,
    A: AccountRepository,
    N: NotificationGateway,
{
    /// Challenge record store
    challenges: Arc<C>,
    /// Account store, for flag updates on successful confirmation
    accounts: Arc<A>,
    /// Outbound notification gateway
    gateway: Arc<N>,
    /// Engine configuration
    config: VerificationConfig,
}

impl<C, A, N> VerificationEngine<C, A, N>
where
    C: ChallengeRepository,
    A: AccountRepository,
    N: NotificationGateway,
{
    /// Create a new verification engine
    pub fn new(
        challenges: Arc<C>,
        accounts: Arc<A>,
        gateway: Arc<N>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            challenges,
            accounts,
            gateway,
            config,
        }
    }

    /// TTL applied to both channel kinds, in minutes
    pub fn code_expiration_minutes(&self) -> i64 {
        self.config.code_expiration_minutes
    }

    /// Issue the first challenge for a channel.
    ///
    /// Persists the challenge, then dispatches the code. A dispatch
    /// failure fails the whole operation with `DispatchFailure`; the
    /// already-persisted record is not cleaned up, and the caller must
    /// treat the registration as failed. The code travels only through
    /// the gateway, never in an API payload.
    pub async fn issue_challenge(
        &self,
        account: &Account,
        channel: ChannelKind,
        channel_value: &str,
    ) -> DomainResult<VerificationChallenge> {
        let challenge =
            VerificationChallenge::new(channel, channel_value.to_string(), account.id);
        let challenge = self.challenges.create(challenge).await?;

        tracing::info!(
            account_id = %account.id,
            channel = %channel,
            channel_value = %Self::mask(channel, channel_value),
            "verification challenge created"
        );

        self.dispatch(channel, channel_value, &challenge.code)
            .await?;

        Ok(challenge)
    }

    /// Confirm a submitted code for a channel.
    ///
    /// The lookup is joint over channel and code: a miss yields the
    /// non-specific `InvalidCredential` whether the channel is unknown
    /// or the code is wrong. On success the challenge is marked
    /// verified, then the owning account's flag is set. These are two
    /// separate writes, not one transaction; a failure between them leaves a
    /// verified challenge with an unverified account.
    pub async fn confirm(
        &self,
        channel: ChannelKind,
        channel_value: &str,
        submitted_code: &str,
    ) -> DomainResult<Account> {
        let found = self
            .challenges
            .find_by_channel_and_code(channel, channel_value, submitted_code)
            .await?;

        let Some(mut challenge) = found else {
            tracing::warn!(
                channel = %channel,
                channel_value = %Self::mask(channel, channel_value),
                "confirmation attempt with unknown channel or wrong code"
            );
            return Err(VerificationError::InvalidCredential { channel }.into());
        };

        if challenge.is_verified {
            tracing::info!(
                channel = %channel,
                channel_value = %Self::mask(channel, channel_value),
                "confirmation attempt on already verified channel"
            );
            return Err(VerificationError::AlreadyVerified { channel }.into());
        }

        if challenge.is_expired(self.config.code_expiration_minutes) {
            tracing::warn!(
                channel = %channel,
                channel_value = %Self::mask(channel, channel_value),
                "expired verification code submitted"
            );
            return Err(VerificationError::Expired.into());
        }

        challenge.mark_verified();
        let challenge = self.challenges.update(challenge).await?;

        let found = self.accounts.find_by_id(challenge.owner_account_id).await?;
        let Some(mut account) = found else {
            tracing::error!(
                account_id = %challenge.owner_account_id,
                channel = %channel,
                "challenge verified but owning account is missing"
            );
            return Err(VerificationError::NotFound {
                resource: "Account".to_string(),
            }
            .into());
        };

        let already_flagged = match channel {
            ChannelKind::Phone => account.is_phone_verified,
            ChannelKind::Email => account.is_email_verified,
        };
        if !already_flagged {
            match channel {
                ChannelKind::Phone => account.verify_phone(),
                ChannelKind::Email => account.verify_email(),
            }
            account = self.accounts.update(account).await?;
        }

        tracing::info!(
            account_id = %account.id,
            channel = %channel,
            "channel verified successfully"
        );

        Ok(account)
    }

    /// Invalidate the outstanding challenge for a channel and issue a new one.
    ///
    /// The old challenge is deleted before anything else, so its code is
    /// permanently unusable even if a later step fails. A dispatch
    /// failure on the resend is logged but does not fail the call; the
    /// caller can always request another resend.
    pub async fn reissue(
        &self,
        channel: ChannelKind,
        channel_value: &str,
    ) -> DomainResult<Account> {
        let found = self.challenges.find_by_channel(channel, channel_value).await?;
        let Some(challenge) = found else {
            tracing::warn!(
                channel = %channel,
                channel_value = %Self::mask(channel, channel_value),
                "resend requested for unregistered channel"
            );
            return Err(VerificationError::NotFound {
                resource: "Verification challenge".to_string(),
            }
            .into());
        };

        if challenge.is_verified {
            tracing::info!(
                channel = %channel,
                channel_value = %Self::mask(channel, channel_value),
                "resend requested for already verified channel"
            );
            return Err(VerificationError::AlreadyVerified { channel }.into());
        }

        self.challenges
            .delete_by_channel(channel, channel_value)
            .await?;

        let found = match channel {
            ChannelKind::Phone => self.accounts.find_by_phone(channel_value).await?,
            ChannelKind::Email => self.accounts.find_by_email(channel_value).await?,
        };
        let Some(account) = found else {
            tracing::error!(
                channel = %channel,
                channel_value = %Self::mask(channel, channel_value),
                "challenge existed but no account owns this channel"
            );
            return Err(VerificationError::NotFound {
                resource: "Account".to_string(),
            }
            .into());
        };

        let challenge =
            VerificationChallenge::new(channel, channel_value.to_string(), account.id);
        let challenge = self.challenges.create(challenge).await?;

        if let Err(e) = self
            .gateway_send(channel, channel_value, &challenge.code)
            .await
        {
            // Unlike issuance, the resend call still succeeds.
            tracing::error!(
                account_id = %account.id,
                channel = %channel,
                channel_value = %Self::mask(channel, channel_value),
                error = %e,
                "resend dispatch failed"
            );
        } else {
            tracing::info!(
                account_id = %account.id,
                channel = %channel,
                "new verification code sent"
            );
        }

        Ok(account)
    }

    /// Dispatch a code, mapping any gateway failure to `DispatchFailure`
    async fn dispatch(
        &self,
        channel: ChannelKind,
        channel_value: &str,
        code: &str,
    ) -> DomainResult<()> {
        self.gateway_send(channel, channel_value, code)
            .await
            .map_err(|e| {
                match &e {
                    DispatchError::Transport(detail) => tracing::error!(
                        channel = %channel,
                        channel_value = %Self::mask(channel, channel_value),
                        detail = %detail,
                        "dispatch failed at transport level"
                    ),
                    DispatchError::ProviderRejected(detail) => tracing::error!(
                        channel = %channel,
                        channel_value = %Self::mask(channel, channel_value),
                        detail = %detail,
                        "dispatch rejected by provider"
                    ),
                }
                VerificationError::DispatchFailure { channel }.into()
            })
    }

    async fn gateway_send(
        &self,
        channel: ChannelKind,
        channel_value: &str,
        code: &str,
    ) -> Result<(), DispatchError> {
        match channel {
            ChannelKind::Phone => self.gateway.send_sms(channel_value, code).await,
            ChannelKind::Email => self.gateway.send_email(channel_value, code).await,
        }
    }

    fn mask(channel: ChannelKind, channel_value: &str) -> String {
        match channel {
            ChannelKind::Phone => mask_phone(channel_value),
            ChannelKind::Email => mask_email(channel_value),
        }
    }
}
