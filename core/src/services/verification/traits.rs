//! Notification gateway contract for outbound code dispatch

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single dispatch attempt.
///
/// Transport failures (network/HTTP errors) and provider rejections
/// (non-success status in the provider's response body) are separate
/// variants for logging only; the engine collapses both into one
/// caller-visible `DispatchFailure`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider rejected the message: {0}")]
    ProviderRejected(String),
}

/// Outbound notification channel for verification codes.
///
/// Both sends are synchronous from the caller's point of view,
/// best-effort, and single-attempt: no retry loop lives behind this
/// trait.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Send a verification code via SMS
    async fn send_sms(&self, phone_number: &str, code: &str) -> Result<(), DispatchError>;

    /// Send a verification code via email
    async fn send_email(&self, address: &str, code: &str) -> Result<(), DispatchError>;
}
