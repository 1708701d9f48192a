use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use sg_api::app::{self, AppState};
use sg_core::repositories::{
    AccountRepository, ChallengeRepository, MockAccountRepository, MockChallengeRepository,
};
use sg_core::services::registration::RegistrationService;
use sg_core::services::verification::{
    NotificationGateway, VerificationConfig, VerificationEngine,
};
use sg_infra::database::{create_pool, DatabaseConfig, MySqlAccountRepository,
    MySqlChallengeRepository};
use sg_infra::{ChannelNotifier, MockSmsSender, SmtpEmailService, ZenderSmsService};
use sg_shared::{Environment, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Signa API server");

    let environment = Environment::from_env();
    let server = ServerConfig::from_env();
    let verification = VerificationConfig::from_env();

    if std::env::var("DATABASE_URL").is_ok() {
        let pool = create_pool(&DatabaseConfig::from_env()?).await?;
        let challenges = Arc::new(MySqlChallengeRepository::new(pool.clone()));
        let accounts = Arc::new(MySqlAccountRepository::new(pool));

        let sms = Arc::new(ZenderSmsService::from_env()?);
        let email = Arc::new(SmtpEmailService::from_env()?);
        let gateway = Arc::new(ChannelNotifier::new(sms, email));

        run(challenges, accounts, gateway, verification, server).await
    } else {
        if environment.is_production() {
            anyhow::bail!("DATABASE_URL must be set when APP_ENV is production");
        }
        warn!("DATABASE_URL not set; using in-memory stores and mock SMS");
        let challenges = Arc::new(MockChallengeRepository::new());
        let accounts = Arc::new(MockAccountRepository::new());

        let sms = Arc::new(MockSmsSender::new());
        let email = Arc::new(SmtpEmailService::from_env()?);
        let gateway = Arc::new(ChannelNotifier::new(sms, email));

        run(challenges, accounts, gateway, verification, server).await
    }
}

async fn run<C, A, N>(
    challenges: Arc<C>,
    accounts: Arc<A>,
    gateway: Arc<N>,
    verification: VerificationConfig,
    server: ServerConfig,
) -> anyhow::Result<()>
where
    C: ChallengeRepository + 'static,
    A: AccountRepository + 'static,
    N: NotificationGateway + 'static,
{
    let engine = Arc::new(VerificationEngine::new(
        challenges,
        accounts.clone(),
        gateway,
        verification,
    ));
    let registration = Arc::new(RegistrationService::new(accounts, engine.clone()));
    let state = web::Data::new(AppState::new(registration, engine));

    let bind_address = server.bind_address();
    info!(%bind_address, "binding HTTP server");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(app::configure::<C, A, N>)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
