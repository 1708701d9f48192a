//! SMS delivery providers

pub mod mock;
pub mod zender;

pub use mock::MockSmsSender;
pub use zender::{ZenderConfig, ZenderSmsService};

use async_trait::async_trait;
use sg_core::services::verification::DispatchError;

/// Outbound SMS transport.
///
/// Implementations deliver a ready-made message body; composing the
/// verification text is the notifier's job, not the provider's.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a message to an E.164 phone number
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), DispatchError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}
