//! Registration and verification payloads
//!
//! DTO-level validation covers shape only (blank fields, password
//! length); channel format, password match, and duplicate checks live
//! in the domain layer, which owns the authoritative rules.

use serde::{Deserialize, Serialize};
use validator::Validate;

use sg_core::services::registration::RegistrationRequest;

/// Body of `POST /registration/`
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password1: String,
    pub password2: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub last_name: String,
}

impl RegisterRequest {
    /// Convert to the domain request, treating blank channels as absent
    pub fn into_domain(self) -> RegistrationRequest {
        RegistrationRequest {
            email: normalize(self.email),
            phone_number: normalize(self.phone_number),
            password1: self.password1,
            password2: self.password2,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Body of `POST /registration/verify-phone/`
#[derive(Debug, Deserialize)]
pub struct VerifyPhoneRequest {
    pub phone_number: String,
    pub code: String,
}

/// Body of `POST /registration/verify-email/`
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Body of `POST /registration/resend-phone/`
#[derive(Debug, Deserialize)]
pub struct ResendPhoneRequest {
    pub phone_number: String,
}

/// Body of `POST /registration/resend-email/`
#[derive(Debug, Deserialize)]
pub struct ResendEmailRequest {
    pub email: String,
}

/// 201 response for registration and resend
#[derive(Debug, Serialize, Deserialize)]
pub struct CodeSentResponse {
    pub detail: String,
    pub expiration_time_in_minutes: i64,
}

/// 200 response for successful verification
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}
