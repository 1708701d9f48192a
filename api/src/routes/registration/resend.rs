//! Handlers for `POST /registration/resend-phone/` and `/resend-email/`

use actix_web::{web, HttpResponse};

use sg_core::domain::entities::ChannelKind;
use sg_core::repositories::{AccountRepository, ChallengeRepository};
use sg_core::services::verification::NotificationGateway;

use crate::app::AppState;
use crate::dto::{CodeSentResponse, ResendEmailRequest, ResendPhoneRequest};
use crate::handlers::domain_error_response;

/// Invalidate the outstanding phone challenge and send a new code
pub async fn resend_phone<C, A, N>(
    state: web::Data<AppState<C, A, N>>,
    payload: web::Json<ResendPhoneRequest>,
) -> HttpResponse
where
    C: ChallengeRepository + 'static,
    A: AccountRepository + 'static,
    N: NotificationGateway + 'static,
{
    resend(&state, ChannelKind::Phone, &payload.phone_number).await
}

/// Invalidate the outstanding email challenge and send a new code
pub async fn resend_email<C, A, N>(
    state: web::Data<AppState<C, A, N>>,
    payload: web::Json<ResendEmailRequest>,
) -> HttpResponse
where
    C: ChallengeRepository + 'static,
    A: AccountRepository + 'static,
    N: NotificationGateway + 'static,
{
    resend(&state, ChannelKind::Email, &payload.email).await
}

async fn resend<C, A, N>(
    state: &web::Data<AppState<C, A, N>>,
    channel: ChannelKind,
    channel_value: &str,
) -> HttpResponse
where
    C: ChallengeRepository + 'static,
    A: AccountRepository + 'static,
    N: NotificationGateway + 'static,
{
    match state.engine.reissue(channel, channel_value).await {
        Ok(_) => HttpResponse::Created().json(CodeSentResponse {
            detail: "Verification code resent successfully".to_string(),
            expiration_time_in_minutes: state.engine.code_expiration_minutes(),
        }),
        Err(err) => domain_error_response(&err),
    }
}
