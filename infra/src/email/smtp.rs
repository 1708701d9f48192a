//! SMTP email sender via lettre
//!
//! When no SMTP host is configured the service runs in no-op mode and
//! only logs, so development setups do not need a mail relay.

use async_trait::async_trait;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, warn};

use sg_core::services::verification::DispatchError;
use sg_shared::validation::mask_email;

use crate::email::EmailSender;
use crate::InfrastructureError;

/// SMTP transport configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay host; empty means no-op mode
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address, e.g. `"Signa <no-reply@signa.app>"`
    pub from: String,
    /// Use STARTTLS instead of implicit TLS
    pub use_starttls: bool,
}

impl SmtpConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("SMTP_HOST").unwrap_or_default(),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            username: std::env::var("SMTP_USERNAME").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
            from: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "no-reply@signa.app".to_string()),
            use_starttls: std::env::var("SMTP_USE_STARTTLS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// Email sender over SMTP, or a logging no-op when unconfigured
pub struct SmtpEmailService {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl SmtpEmailService {
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP_FROM address: {}", e)))?;

        let transport = if config.host.trim().is_empty() {
            warn!("SMTP host not configured; email sender will operate in no-op mode");
            None
        } else {
            let builder = if config.use_starttls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            }
            .map_err(|e| {
                InfrastructureError::Config(format!("Failed to configure SMTP transport: {}", e))
            })?
            .port(config.port);

            let builder = if let (Some(username), Some(password)) =
                (&config.username, &config.password)
            {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SmtpConfig::from_env())
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }
}

#[async_trait]
impl EmailSender for SmtpEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), DispatchError> {
        let Some(transport) = &self.transport else {
            info!(
                recipient = %mask_email(recipient),
                subject,
                "email sender in no-op mode; skipping actual send"
            );
            return Ok(());
        };

        let to = recipient
            .parse::<Mailbox>()
            .map_err(|e| DispatchError::ProviderRejected(format!("Invalid recipient: {}", e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| DispatchError::Transport(format!("Failed to build message: {}", e)))?;

        transport
            .send(email)
            .await
            .map_err(|e| DispatchError::Transport(format!("SMTP send failed: {}", e)))?;

        info!(recipient = %mask_email(recipient), subject, "email sent");
        Ok(())
    }
}
