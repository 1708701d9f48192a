//! Zender SMS gateway implementation
//!
//! Delivers messages through a Zender instance's device mode. The API
//! reports failures two ways: a non-200 HTTP status, or a 200 response
//! whose JSON body carries a non-200 `status` field. Both are mapped to
//! distinct dispatch errors so the logs tell them apart.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use sg_core::services::verification::DispatchError;
use sg_shared::validation::mask_phone;

use crate::sms::SmsSender;
use crate::InfrastructureError;

const DEFAULT_BASE_URL: &str = "https://salebot.demo.zoomnearby.com/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Zender gateway configuration
#[derive(Debug, Clone)]
pub struct ZenderConfig {
    /// API secret for the Zender instance
    pub api_key: String,
    /// Device identifier the message is sent through
    pub sender_id: String,
    /// Base URL of the Zender API
    pub base_url: String,
    /// SIM slot on the sending device
    pub sim_slot: u8,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl ZenderConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let api_key = std::env::var("ZENDER_API_KEY")
            .map_err(|_| InfrastructureError::Config("ZENDER_API_KEY not set".to_string()))?;
        let sender_id = std::env::var("ZENDER_SENDER_ID")
            .map_err(|_| InfrastructureError::Config("ZENDER_SENDER_ID not set".to_string()))?;

        Ok(Self {
            api_key,
            sender_id,
            base_url: std::env::var("ZENDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            sim_slot: std::env::var("ZENDER_SIM_SLOT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            request_timeout_secs: std::env::var("ZENDER_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ZenderResponse {
    status: Option<i64>,
    message: Option<String>,
}

/// SMS sender backed by the Zender HTTP API
pub struct ZenderSmsService {
    client: reqwest::Client,
    config: ZenderConfig,
}

impl ZenderSmsService {
    /// Create a new Zender SMS service
    pub fn new(config: ZenderConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Config(format!("HTTP client build failed: {}", e)))?;

        info!(device = %config.sender_id, "Zender SMS service initialized");

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(ZenderConfig::from_env()?)
    }
}

#[async_trait]
impl SmsSender for ZenderSmsService {
    async fn send(&self, phone_number: &str, message: &str) -> Result<(), DispatchError> {
        let url = format!("{}/send/sms", self.config.base_url);
        let sim = self.config.sim_slot.to_string();
        let params = [
            ("secret", self.config.api_key.as_str()),
            ("mode", "devices"),
            ("phone", phone_number),
            ("message", message),
            ("sim", sim.as_str()),
            ("device", self.config.sender_id.as_str()),
        ];

        debug!(phone = %mask_phone(phone_number), "sending SMS via Zender");

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(format!("Zender request failed: {}", e)))?;

        let http_status = response.status();
        if !http_status.is_success() {
            warn!(status = %http_status, "Zender returned HTTP error");
            return Err(DispatchError::Transport(format!(
                "Zender HTTP status {}",
                http_status
            )));
        }

        let body: ZenderResponse = response
            .json()
            .await
            .map_err(|e| DispatchError::Transport(format!("Zender response unreadable: {}", e)))?;

        if body.status != Some(200) {
            let detail = body.message.unwrap_or_else(|| "Unknown error".to_string());
            return Err(DispatchError::ProviderRejected(detail));
        }

        info!(phone = %mask_phone(phone_number), "SMS accepted by Zender");
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "Zender"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Both tests mutate the process environment; they must not
    // interleave with each other.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("ZENDER_BASE_URL");
        std::env::remove_var("ZENDER_SIM_SLOT");
        std::env::set_var("ZENDER_API_KEY", "secret-key");
        std::env::set_var("ZENDER_SENDER_ID", "device-1");

        let config = ZenderConfig::from_env().unwrap();
        assert_eq!(config.api_key, "secret-key");
        assert_eq!(config.sender_id, "device-1");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.sim_slot, 1);

        std::env::remove_var("ZENDER_API_KEY");
        std::env::remove_var("ZENDER_SENDER_ID");
    }

    #[test]
    fn test_config_requires_api_key() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("ZENDER_API_KEY");
        std::env::set_var("ZENDER_SENDER_ID", "device-1");

        let err = ZenderConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("ZENDER_API_KEY"));

        std::env::remove_var("ZENDER_SENDER_ID");
    }
}
