//! Error types for the verification and registration flow.

use thiserror::Error;

use crate::domain::entities::ChannelKind;

/// Failures of the verification-code lifecycle.
///
/// `InvalidCredential` is deliberately non-specific: a wrong code and an
/// unknown channel produce the same error so callers cannot enumerate
/// registered channels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid {channel} or code.")]
    InvalidCredential { channel: ChannelKind },

    #[error("This {channel} is already verified.")]
    AlreadyVerified { channel: ChannelKind },

    #[error("The verification code has expired.")]
    Expired,

    #[error("{resource} not found.")]
    NotFound { resource: String },

    #[error("This {channel} is already registered.")]
    DuplicateChannel { channel: ChannelKind },

    #[error("Failed to send verification code via {channel}.")]
    DispatchFailure { channel: ChannelKind },
}

/// Input validation failures, carrying the offending field for
/// field-level error responses at the API boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Passwords must match.")]
    PasswordMismatch,

    #[error("Either email or phone number is required.")]
    MissingChannel,

    #[error("Provide either email or phone number, not both.")]
    AmbiguousChannel,

    #[error("A user with this {field} already exists.")]
    DuplicateValue { field: String },
}

impl ValidationError {
    /// Field name to attach the error message to in API responses
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field } => field,
            ValidationError::InvalidFormat { field } => field,
            ValidationError::PasswordMismatch => "password2",
            ValidationError::MissingChannel => "non_field_errors",
            ValidationError::AmbiguousChannel => "non_field_errors",
            ValidationError::DuplicateValue { field } => field,
        }
    }
}
