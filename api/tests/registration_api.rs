//! HTTP-level tests for the registration and verification endpoints,
//! wired against in-memory stores and the mock SMS sender.

use actix_web::{test, web, App};
use std::sync::Arc;

use sg_api::app::{self, AppState};
use sg_api::dto::{CodeSentResponse, DetailResponse};
use sg_core::domain::entities::ChannelKind;
use sg_core::repositories::{ChallengeRepository, MockAccountRepository, MockChallengeRepository};
use sg_core::services::registration::RegistrationService;
use sg_core::services::verification::{VerificationConfig, VerificationEngine};
use sg_infra::{ChannelNotifier, MockSmsSender, SmtpConfig, SmtpEmailService};

type Gateway = ChannelNotifier<MockSmsSender, SmtpEmailService>;
type State = AppState<MockChallengeRepository, MockAccountRepository, Gateway>;

struct TestWiring {
    state: web::Data<State>,
    challenges: Arc<MockChallengeRepository>,
    sms: Arc<MockSmsSender>,
}

fn wiring() -> TestWiring {
    let challenges = Arc::new(MockChallengeRepository::new());
    let accounts = Arc::new(MockAccountRepository::new());
    let sms = Arc::new(MockSmsSender::new());
    let email = SmtpEmailService::new(SmtpConfig {
        host: String::new(),
        port: 587,
        username: None,
        password: None,
        from: "no-reply@signa.app".to_string(),
        use_starttls: true,
    })
    .unwrap();
    let gateway = Arc::new(ChannelNotifier::new(sms.clone(), Arc::new(email)));

    let engine = Arc::new(VerificationEngine::new(
        challenges.clone(),
        accounts.clone(),
        gateway,
        VerificationConfig::default(),
    ));
    let registration = Arc::new(RegistrationService::new(accounts, engine.clone()));

    TestWiring {
        state: web::Data::new(AppState::new(registration, engine)),
        challenges,
        sms,
    }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(app::configure::<MockChallengeRepository, MockAccountRepository, Gateway>),
        )
        .await
    };
}

fn register_body(phone: Option<&str>, email: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "phone_number": phone,
        "email": email,
        "password1": "hunter2hunter2",
        "password2": "hunter2hunter2",
        "first_name": "Ada",
        "last_name": "Lovelace",
    })
}

#[actix_web::test]
async fn test_register_and_verify_phone() {
    let w = wiring();
    let app = test_app!(w.state);
    let phone = "+15551234567";

    let req = test::TestRequest::post()
        .uri("/registration/")
        .set_json(register_body(Some(phone), None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: CodeSentResponse = test::read_body_json(resp).await;
    assert_eq!(body.expiration_time_in_minutes, 10);
    assert_eq!(w.sms.sent_count(), 1);

    let code = w
        .challenges
        .find_by_channel(ChannelKind::Phone, phone)
        .await
        .unwrap()
        .unwrap()
        .code;

    let req = test::TestRequest::post()
        .uri("/registration/verify-phone/")
        .set_json(serde_json::json!({ "phone_number": phone, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: DetailResponse = test::read_body_json(resp).await;
    assert_eq!(body.detail, "Phone number verified successfully");

    // The code is single-use.
    let req = test::TestRequest::post()
        .uri("/registration/verify-phone/")
        .set_json(serde_json::json!({ "phone_number": phone, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_register_without_channel_returns_field_errors() {
    let w = wiring();
    let app = test_app!(w.state);

    let req = test::TestRequest::post()
        .uri("/registration/")
        .set_json(register_body(None, None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.get("non_field_errors").is_some());
}

#[actix_web::test]
async fn test_wrong_code_rejected_without_detail_leak() {
    let w = wiring();
    let app = test_app!(w.state);
    let phone = "+15551234567";

    let req = test::TestRequest::post()
        .uri("/registration/")
        .set_json(register_body(Some(phone), None))
        .to_request();
    test::call_service(&app, req).await;

    // Wrong code for a known channel and any code for an unknown
    // channel must yield the same response.
    let req = test::TestRequest::post()
        .uri("/registration/verify-phone/")
        .set_json(serde_json::json!({ "phone_number": phone, "code": "000000" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let known: serde_json::Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/registration/verify-phone/")
        .set_json(serde_json::json!({ "phone_number": "+15550000000", "code": "000000" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let unknown: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(known, unknown);
}

#[actix_web::test]
async fn test_resend_email_issues_new_code() {
    let w = wiring();
    let app = test_app!(w.state);
    let email = "ada@example.com";

    let req = test::TestRequest::post()
        .uri("/registration/")
        .set_json(register_body(None, Some(email)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri("/registration/resend-email/")
        .set_json(serde_json::json!({ "email": email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: CodeSentResponse = test::read_body_json(resp).await;
    assert_eq!(body.detail, "Verification code resent successfully");

    let code = w
        .challenges
        .find_by_channel(ChannelKind::Email, email)
        .await
        .unwrap()
        .unwrap()
        .code;

    let req = test::TestRequest::post()
        .uri("/registration/verify-email/")
        .set_json(serde_json::json!({ "email": email, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_malformed_code_rejected_with_field_error() {
    let w = wiring();
    let app = test_app!(w.state);

    for bad_code in ["12345", "1234567", "12a456", ""] {
        let req = test::TestRequest::post()
            .uri("/registration/verify-phone/")
            .set_json(serde_json::json!({
                "phone_number": "+15551234567",
                "code": bad_code,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body.get("code").is_some(), "code {bad_code:?} should fail on the code field");
    }
}

#[actix_web::test]
async fn test_non_ascii_channel_value_handled_without_panic() {
    let w = wiring();
    let app = test_app!(w.state);

    // Unvalidated multi-byte values flow into the engine's masked log
    // paths; the request must fail with 400, never crash the handler.
    let req = test::TestRequest::post()
        .uri("/registration/verify-phone/")
        .set_json(serde_json::json!({ "phone_number": "€€€€€", "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::post()
        .uri("/registration/resend-phone/")
        .set_json(serde_json::json!({ "phone_number": "€€€€€" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::post()
        .uri("/registration/resend-email/")
        .set_json(serde_json::json!({ "email": "€€€@exämple.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_resend_for_unknown_channel_returns_400() {
    let w = wiring();
    let app = test_app!(w.state);

    let req = test::TestRequest::post()
        .uri("/registration/resend-phone/")
        .set_json(serde_json::json!({ "phone_number": "+15550000000" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_register_returns_500_when_dispatch_fails() {
    let w = wiring();
    let app = test_app!(w.state);
    w.sms.simulate_failure(true);

    let req = test::TestRequest::post()
        .uri("/registration/")
        .set_json(register_body(Some("+15551234567"), None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}
