//! Mock SMS sender for development and testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::info;

use sg_core::services::verification::DispatchError;
use sg_shared::validation::mask_phone;

use crate::sms::SmsSender;

/// In-memory sender that logs instead of delivering.
///
/// The default wiring for local development, where no Zender instance
/// is reachable. Records every message and can be told to fail.
#[derive(Default)]
pub struct MockSmsSender {
    sent_count: AtomicUsize,
    should_fail: AtomicBool,
    messages: Mutex<Vec<(String, String)>>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with a transport error
    pub fn simulate_failure(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent_count.load(Ordering::SeqCst)
    }

    /// Last message sent to the given number, if any
    pub fn last_message_to(&self, phone_number: &str) -> Option<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(phone, _)| phone == phone_number)
            .map(|(_, message)| message.clone())
    }
}

#[async_trait]
impl SmsSender for MockSmsSender {
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), DispatchError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DispatchError::Transport(
                "simulated SMS failure".to_string(),
            ));
        }

        self.sent_count.fetch_add(1, Ordering::SeqCst);
        self.messages
            .lock()
            .unwrap()
            .push((phone_number.to_string(), message.to_string()));

        info!(phone = %mask_phone(phone_number), "mock SMS sent");
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
