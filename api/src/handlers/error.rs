//! Mapping from domain errors to HTTP responses
//!
//! Validation failures become 400 with field-level messages. Expected
//! lifecycle failures become 400 with a flat detail message. Dispatch
//! and store failures become 500; their detail stays generic so
//! provider internals never leak to the client.

use actix_web::HttpResponse;
use tracing::{error, warn};

use sg_core::errors::{DomainError, VerificationError};
use sg_shared::{ErrorResponse, FieldErrors};

/// Recover a domain error into an HTTP response
pub fn domain_error_response(err: &DomainError) -> HttpResponse {
    match err {
        DomainError::Validation(validation) => {
            warn!(field = validation.field(), error = %validation, "request validation failed");
            HttpResponse::BadRequest()
                .json(FieldErrors::single(validation.field(), validation.to_string()))
        }
        DomainError::Verification(verification) => match verification {
            VerificationError::DispatchFailure { channel } => {
                error!(channel = %channel, "verification code dispatch failed");
                HttpResponse::InternalServerError()
                    .json(ErrorResponse::new("Failed to send verification code."))
            }
            expected => {
                warn!(error = %expected, "verification request rejected");
                HttpResponse::BadRequest().json(ErrorResponse::new(expected.to_string()))
            }
        },
        DomainError::Internal { message } => {
            error!(message = %message, "unexpected internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error."))
        }
    }
}

/// Recover `validator` derive errors into field-level messages
pub fn validator_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut fields = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        for field_error in field_errors {
            let message = field_error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| field_error.code.to_string());
            fields.add(field.to_string(), message);
        }
    }

    warn!(fields = ?fields.fields().keys().collect::<Vec<_>>(), "payload validation failed");
    HttpResponse::BadRequest().json(fields)
}
