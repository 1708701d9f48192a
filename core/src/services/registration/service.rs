//! Registration service implementation

use std::sync::Arc;

use crate::domain::entities::{Account, ChannelKind};
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::{AccountRepository, ChallengeRepository};
use crate::services::verification::{NotificationGateway, VerificationEngine};
use sg_shared::validation::{is_valid_email, is_valid_phone_number};

use super::types::{RegistrationOutcome, RegistrationRequest};

/// Orchestrates a registration: validates the submission, creates the
/// account, and delegates to the verification engine for the first
/// challenge. Account creation itself is thin glue; the engine call is
/// where the interesting behavior lives.
pub struct RegistrationService<A, C, N>
where
    A: AccountRepository,
    C: ChallengeRepository,
    N: NotificationGateway,
{
    accounts: Arc<A>,
    engine: Arc<VerificationEngine<C, A, N>>,
}

impl<A, C, N> RegistrationService<A, C, N>
where
    A: AccountRepository,
    C: ChallengeRepository,
    N: NotificationGateway,
{
    pub fn new(accounts: Arc<A>, engine: Arc<VerificationEngine<C, A, N>>) -> Self {
        Self { accounts, engine }
    }

    /// Register a new account and issue its first verification challenge.
    ///
    /// A concurrent registration for the same channel value races on the
    /// account store's uniqueness constraint; the loser surfaces
    /// `DuplicateChannel` rather than a raw store error. A dispatch
    /// failure fails the registration as a whole.
    pub async fn register(&self, request: RegistrationRequest) -> DomainResult<RegistrationOutcome> {
        let (channel, channel_value) = self.validate(&request).await?;
        let channel_value = channel_value.to_string();

        let account = match channel {
            ChannelKind::Phone => Account::with_phone(
                channel_value.clone(),
                request.first_name.clone(),
                request.last_name.clone(),
            ),
            ChannelKind::Email => Account::with_email(
                channel_value.clone(),
                request.first_name.clone(),
                request.last_name.clone(),
            ),
        };

        let account = self.accounts.create(account).await?;
        tracing::info!(account_id = %account.id, channel = %channel, "new account created");

        let challenge = self
            .engine
            .issue_challenge(&account, channel, &channel_value)
            .await?;
        debug_assert!(!challenge.is_verified);

        Ok(RegistrationOutcome {
            account,
            expiration_minutes: self.engine.code_expiration_minutes(),
        })
    }

    async fn validate<'a>(
        &self,
        request: &'a RegistrationRequest,
    ) -> DomainResult<(ChannelKind, &'a str)> {
        let (channel, channel_value) = match (&request.phone_number, &request.email) {
            (None, None) => {
                tracing::warn!("registration attempt without email and phone number");
                return Err(ValidationError::MissingChannel.into());
            }
            (Some(_), Some(_)) => {
                tracing::warn!("registration attempt with both email and phone number");
                return Err(ValidationError::AmbiguousChannel.into());
            }
            (Some(phone), None) => (ChannelKind::Phone, phone.as_str()),
            (None, Some(email)) => (ChannelKind::Email, email.as_str()),
        };

        if request.password1 != request.password2 {
            tracing::warn!("registration attempt with mismatched passwords");
            return Err(ValidationError::PasswordMismatch.into());
        }

        if request.first_name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "first_name".to_string(),
            }
            .into());
        }
        if request.last_name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "last_name".to_string(),
            }
            .into());
        }

        match channel {
            ChannelKind::Phone => {
                if !is_valid_phone_number(channel_value) {
                    return Err(ValidationError::InvalidFormat {
                        field: "phone_number".to_string(),
                    }
                    .into());
                }
                if self.accounts.exists_by_phone(channel_value).await? {
                    tracing::warn!("registration attempt with existing phone number");
                    return Err(ValidationError::DuplicateValue {
                        field: "phone_number".to_string(),
                    }
                    .into());
                }
            }
            ChannelKind::Email => {
                if !is_valid_email(channel_value) {
                    return Err(ValidationError::InvalidFormat {
                        field: "email".to_string(),
                    }
                    .into());
                }
                if self.accounts.exists_by_email(channel_value).await? {
                    tracing::warn!("registration attempt with existing email");
                    return Err(ValidationError::DuplicateValue {
                        field: "email".to_string(),
                    }
                    .into());
                }
            }
        }

        Ok((channel, channel_value))
    }
}
