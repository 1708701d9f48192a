//! Request and result types for registration

use crate::domain::entities::Account;

/// A registration submission, after transport-level deserialization.
///
/// The password pair is validated for agreement only; credential
/// storage belongs to the account store and is outside this service.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password1: String,
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
}

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    /// The created account
    pub account: Account,
    /// Minutes until the dispatched code expires
    pub expiration_minutes: i64,
}
