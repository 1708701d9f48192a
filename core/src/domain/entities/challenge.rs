//! Verification challenge entity: one outstanding one-time code for a contact channel.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Contact channel kind a challenge proves ownership of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Phone,
    Email,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Phone => "phone",
            ChannelKind::Email => "email",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outstanding attempt to prove ownership of a contact channel.
///
/// At most one live challenge exists per `(channel, channel_value)`;
/// the record store enforces uniqueness on the channel value. Expiry is
/// evaluated lazily at confirmation time against `created_at`; expired
/// challenges are never swept by a background task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationChallenge {
    /// Channel kind this challenge verifies
    pub channel: ChannelKind,

    /// The contact value (phone number or email address)
    pub channel_value: String,

    /// The 6-digit verification code
    pub code: String,

    /// Account this challenge verifies a channel for
    pub owner_account_id: Uuid,

    /// Whether the code has been successfully confirmed
    pub is_verified: bool,

    /// Timestamp when the challenge was created; immutable
    pub created_at: DateTime<Utc>,
}

impl VerificationChallenge {
    /// Creates a new challenge with a freshly generated code
    pub fn new(channel: ChannelKind, channel_value: String, owner_account_id: Uuid) -> Self {
        Self {
            channel,
            channel_value,
            code: Self::generate_code(),
            owner_account_id,
            is_verified: false,
            created_at: Utc::now(),
        }
    }

    /// Generates a random 6-digit code, uniform over [100000, 999999].
    ///
    /// The lower bound keeps every code at exactly six digits; codes may
    /// collide across channels, uniqueness is per-channel only.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(100_000..=999_999u32).to_string()
    }

    /// Whether the challenge is older than the given TTL
    pub fn is_expired(&self, ttl_minutes: i64) -> bool {
        Utc::now() - self.created_at > Duration::minutes(ttl_minutes)
    }

    /// Marks the challenge as verified
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_challenge() -> VerificationChallenge {
        VerificationChallenge::new(
            ChannelKind::Phone,
            "+15551234567".to_string(),
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_new_challenge() {
        let challenge = phone_challenge();

        assert_eq!(challenge.channel, ChannelKind::Phone);
        assert_eq!(challenge.code.len(), CODE_LENGTH);
        assert!(!challenge.is_verified);
        assert!(!challenge.is_expired(10));
    }

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = VerificationChallenge::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            let num: u32 = code.parse().expect("code should be numeric");
            assert!((100_000..=999_999).contains(&num));
        }
    }

    #[test]
    fn test_codes_vary() {
        let codes: std::collections::HashSet<String> = (0..100)
            .map(|_| VerificationChallenge::generate_code())
            .collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_expiry_against_backdated_creation() {
        let mut challenge = phone_challenge();
        challenge.created_at = Utc::now() - Duration::minutes(11);

        assert!(challenge.is_expired(10));
        assert!(!challenge.is_expired(15));
    }

    #[test]
    fn test_mark_verified() {
        let mut challenge = phone_challenge();
        challenge.mark_verified();
        assert!(challenge.is_verified);
    }

    #[test]
    fn test_channel_kind_display() {
        assert_eq!(ChannelKind::Phone.to_string(), "phone");
        assert_eq!(ChannelKind::Email.to_string(), "email");
    }
}
