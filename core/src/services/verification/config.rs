//! Configuration for the verification engine

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Configuration for the verification engine.
///
/// One TTL is shared by both channel kinds.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }
}

impl VerificationConfig {
    /// Read the TTL from `VERIFICATION_CODE_EXPIRATION_MINUTES`,
    /// falling back to the default when unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            code_expiration_minutes: std::env::var("VERIFICATION_CODE_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_EXPIRATION_MINUTES),
        }
    }
}
