//! Account entity: the partial view of a user record the verification core reads and writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account.
///
/// Exactly one of `email` / `phone_number` is set, depending on the
/// registration path; the constructors enforce this. The verification
/// flags start false and only ever move to true, and only the
/// verification engine mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Email address, if the account registered by email (unique)
    pub email: Option<String>,

    /// Phone number in E.164 format, if the account registered by phone (unique)
    pub phone_number: Option<String>,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Whether the account is active
    pub is_active: bool,

    /// Whether the phone number has been verified
    pub is_phone_verified: bool,

    /// Whether the email address has been verified
    pub is_email_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account registered by phone number
    pub fn with_phone(phone_number: String, first_name: String, last_name: String) -> Self {
        Self::new(None, Some(phone_number), first_name, last_name)
    }

    /// Creates a new account registered by email address
    pub fn with_email(email: String, first_name: String, last_name: String) -> Self {
        Self::new(Some(email), None, first_name, last_name)
    }

    fn new(
        email: Option<String>,
        phone_number: Option<String>,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            phone_number,
            first_name,
            last_name,
            is_active: true,
            is_phone_verified: false,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the phone number as verified. Already-verified accounts are left unchanged.
    pub fn verify_phone(&mut self) {
        if !self.is_phone_verified {
            self.is_phone_verified = true;
            self.updated_at = Utc::now();
        }
    }

    /// Marks the email address as verified. Already-verified accounts are left unchanged.
    pub fn verify_email(&mut self) {
        if !self.is_email_verified {
            self.is_email_verified = true;
            self.updated_at = Utc::now();
        }
    }

    /// Full name for display purposes
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
