//! Email delivery

pub mod smtp;

pub use smtp::{SmtpConfig, SmtpEmailService};

use async_trait::async_trait;
use sg_core::services::verification::DispatchError;

/// Outbound email transport
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a plain-text message to a single recipient
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), DispatchError>;
}
