//! Channel notifier: routes verification codes to SMS or email
//!
//! Implements the core `NotificationGateway` trait over concrete
//! transports. Message composition lives here so every provider sends
//! identical text.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

use sg_core::services::verification::{DispatchError, NotificationGateway};
use sg_shared::validation::mask_phone;

use crate::email::EmailSender;
use crate::sms::SmsSender;

const EMAIL_SUBJECT: &str = "Registration Confirmation";

fn sms_body(code: &str) -> String {
    format!("Your verification code is: {}", code)
}

/// Gateway implementation over an SMS sender and an email sender
pub struct ChannelNotifier<S, E>
where
    S: SmsSender,
    E: EmailSender,
{
    sms: Arc<S>,
    email: Arc<E>,
}

impl<S, E> ChannelNotifier<S, E>
where
    S: SmsSender,
    E: EmailSender,
{
    pub fn new(sms: Arc<S>, email: Arc<E>) -> Self {
        Self { sms, email }
    }
}

impl<S, E> ChannelNotifier<S, E>
where
    S: SmsSender + 'static,
    E: EmailSender,
{
    /// Fire-and-forget SMS dispatch.
    ///
    /// Spawns the send on the runtime and returns immediately; a
    /// failure is logged, never surfaced. For callers that must not
    /// block on the provider.
    pub fn send_sms_detached(&self, phone_number: &str, code: &str) {
        let sms = self.sms.clone();
        let phone = phone_number.to_string();
        let body = sms_body(code);
        tokio::spawn(async move {
            if let Err(e) = sms.send(&phone, &body).await {
                error!(
                    phone = %mask_phone(&phone),
                    error = %e,
                    "detached SMS dispatch failed"
                );
            }
        });
    }
}

#[async_trait]
impl<S, E> NotificationGateway for ChannelNotifier<S, E>
where
    S: SmsSender,
    E: EmailSender,
{
    async fn send_sms(&self, phone_number: &str, code: &str) -> Result<(), DispatchError> {
        self.sms.send(phone_number, &sms_body(code)).await
    }

    async fn send_email(&self, address: &str, code: &str) -> Result<(), DispatchError> {
        self.email.send(address, EMAIL_SUBJECT, code).await
    }
}
