//! Application state and route configuration

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use sg_core::repositories::{AccountRepository, ChallengeRepository};
use sg_core::services::registration::RegistrationService;
use sg_core::services::verification::{NotificationGateway, VerificationEngine};

use crate::routes;

/// Shared services handed to every handler
pub struct AppState<C, A, N>
where
    C: ChallengeRepository,
    A: AccountRepository,
    N: NotificationGateway,
{
    pub registration: Arc<RegistrationService<A, C, N>>,
    pub engine: Arc<VerificationEngine<C, A, N>>,
}

impl<C, A, N> AppState<C, A, N>
where
    C: ChallengeRepository,
    A: AccountRepository,
    N: NotificationGateway,
{
    pub fn new(
        registration: Arc<RegistrationService<A, C, N>>,
        engine: Arc<VerificationEngine<C, A, N>>,
    ) -> Self {
        Self {
            registration,
            engine,
        }
    }
}

/// Register all routes for one concrete wiring of the services
pub fn configure<C, A, N>(cfg: &mut web::ServiceConfig)
where
    C: ChallengeRepository + 'static,
    A: AccountRepository + 'static,
    N: NotificationGateway + 'static,
{
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/registration")
            .route("/", web::post().to(routes::registration::register::<C, A, N>))
            .route(
                "/verify-phone/",
                web::post().to(routes::registration::verify_phone::<C, A, N>),
            )
            .route(
                "/verify-email/",
                web::post().to(routes::registration::verify_email::<C, A, N>),
            )
            .route(
                "/resend-phone/",
                web::post().to(routes::registration::resend_phone::<C, A, N>),
            )
            .route(
                "/resend-email/",
                web::post().to(routes::registration::resend_email::<C, A, N>),
            ),
    );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "signa-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
