//! Handlers for `POST /registration/verify-phone/` and `/verify-email/`

use actix_web::{web, HttpResponse};

use sg_core::domain::entities::ChannelKind;
use sg_core::repositories::{AccountRepository, ChallengeRepository};
use sg_core::services::verification::NotificationGateway;
use sg_shared::validation::is_valid_code;
use sg_shared::FieldErrors;

use crate::app::AppState;
use crate::dto::{DetailResponse, VerifyEmailRequest, VerifyPhoneRequest};
use crate::handlers::domain_error_response;

/// Reject a code that is not exactly six digits before it reaches the
/// store; the shape check leaks nothing about registered channels.
fn check_code_shape(code: &str) -> Option<HttpResponse> {
    if is_valid_code(code) {
        None
    } else {
        Some(
            HttpResponse::BadRequest().json(FieldErrors::single(
                "code",
                "Enter a valid 6-digit verification code.",
            )),
        )
    }
}

/// Confirm a phone number with a submitted code
pub async fn verify_phone<C, A, N>(
    state: web::Data<AppState<C, A, N>>,
    payload: web::Json<VerifyPhoneRequest>,
) -> HttpResponse
where
    C: ChallengeRepository + 'static,
    A: AccountRepository + 'static,
    N: NotificationGateway + 'static,
{
    if let Some(rejection) = check_code_shape(&payload.code) {
        return rejection;
    }

    match state
        .engine
        .confirm(ChannelKind::Phone, &payload.phone_number, &payload.code)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(DetailResponse {
            detail: "Phone number verified successfully".to_string(),
        }),
        Err(err) => domain_error_response(&err),
    }
}

/// Confirm an email address with a submitted code
pub async fn verify_email<C, A, N>(
    state: web::Data<AppState<C, A, N>>,
    payload: web::Json<VerifyEmailRequest>,
) -> HttpResponse
where
    C: ChallengeRepository + 'static,
    A: AccountRepository + 'static,
    N: NotificationGateway + 'static,
{
    if let Some(rejection) = check_code_shape(&payload.code) {
        return rejection;
    }

    match state
        .engine
        .confirm(ChannelKind::Email, &payload.email, &payload.code)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(DetailResponse {
            detail: "Email verified successfully".to_string(),
        }),
        Err(err) => domain_error_response(&err),
    }
}
