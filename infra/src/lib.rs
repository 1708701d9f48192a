//! Infrastructure layer for the Signa verification service.
//!
//! Concrete implementations behind the core traits:
//! - **Database**: MySQL stores using SQLx
//! - **SMS**: Zender HTTP gateway
//! - **Email**: SMTP delivery via lettre
//! - **Notification**: channel router implementing the core gateway trait

pub mod database;
pub mod email;
pub mod notification;
pub mod sms;

pub use email::{EmailSender, SmtpConfig, SmtpEmailService};
pub use notification::ChannelNotifier;
pub use sms::{MockSmsSender, SmsSender, ZenderConfig, ZenderSmsService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
