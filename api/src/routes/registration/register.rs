//! Handler for `POST /registration/`

use actix_web::{web, HttpResponse};
use tracing::info;
use validator::Validate;

use sg_core::repositories::{AccountRepository, ChallengeRepository};
use sg_core::services::verification::NotificationGateway;

use crate::app::AppState;
use crate::dto::{CodeSentResponse, RegisterRequest};
use crate::handlers::{domain_error_response, validator_error_response};

/// Create an account and send the first verification code.
///
/// Returns 201 with the code's TTL on success, 400 with field-level
/// errors on invalid input, 500 if the code could not be dispatched.
pub async fn register<C, A, N>(
    state: web::Data<AppState<C, A, N>>,
    payload: web::Json<RegisterRequest>,
) -> HttpResponse
where
    C: ChallengeRepository + 'static,
    A: AccountRepository + 'static,
    N: NotificationGateway + 'static,
{
    if let Err(errors) = payload.validate() {
        return validator_error_response(&errors);
    }

    match state
        .registration
        .register(payload.into_inner().into_domain())
        .await
    {
        Ok(outcome) => {
            info!(account_id = %outcome.account.id, "registration completed");
            HttpResponse::Created().json(CodeSentResponse {
                detail: "Verification code sent successfully".to_string(),
                expiration_time_in_minutes: outcome.expiration_minutes,
            })
        }
        Err(err) => domain_error_response(&err),
    }
}
