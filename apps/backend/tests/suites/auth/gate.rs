// Integration tests for the request authentication gate.

use std::sync::Arc;

use actix_web::{test, web, HttpResponse};
use memshare_backend::auth::AuthContext;
use memshare_backend::extractors::MaybeIdentity;
use memshare_backend::state::security_config::SecurityConfig;
use memshare_backend::AuthGate;
use serde_json::{json, Value};

use crate::support::auth::{bearer_header, mint_expired_token};
use crate::support::identity_store::{identity, CountingStore};
use crate::support::test_state::build_store_state;
use crate::support::create_test_app;

async fn whoami(maybe: MaybeIdentity) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "userId": maybe.context().map(AuthContext::user_id),
    }))
}

fn probe_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/whoami", web::get().to(whoami));
}

async fn probe(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    authorization: Option<&str>,
) -> Value {
    let mut req = test::TestRequest::get().uri("/whoami");
    if let Some(value) = authorization {
        req = req.insert_header(("Authorization", value));
    }
    let resp = test::call_service(app, req.to_request()).await;
    assert_eq!(resp.status().as_u16(), 200, "gate must never reject");
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn valid_token_attaches_context() -> Result<(), Box<dyn std::error::Error>> {
    let sec = SecurityConfig::for_tests();
    let alice = identity(7, "a@x.com");
    let store = Arc::new(CountingStore::with([alice.clone()]));
    let state = build_store_state(sec.clone(), store.clone()).await?;
    let app = create_test_app(state).with_routes(probe_routes).build().await;

    let body = probe(&app, Some(&bearer_header(&alice, &sec))).await;
    assert_eq!(body["userId"], 7);
    assert_eq!(store.lookups(), 1);
    Ok(())
}

#[actix_web::test]
async fn malformed_authorization_header_continues_anonymously(
) -> Result<(), Box<dyn std::error::Error>> {
    let sec = SecurityConfig::for_tests();
    let store = Arc::new(CountingStore::with([identity(7, "a@x.com")]));
    let state = build_store_state(sec, store.clone()).await?;
    let app = create_test_app(state).with_routes(probe_routes).build().await;

    for header in [None, Some("Malformed xyz"), Some("Bearer "), Some("Bearer not.a.jwt")] {
        let body = probe(&app, header).await;
        assert_eq!(body["userId"], Value::Null, "header {header:?}");
    }
    assert_eq!(store.lookups(), 0, "no lookup without a decodable subject");
    Ok(())
}

#[actix_web::test]
async fn rejected_tokens_leave_request_anonymous() -> Result<(), Box<dyn std::error::Error>> {
    let sec = SecurityConfig::for_tests();
    let alice = identity(7, "a@x.com");
    let ghost = identity(9, "ghost@x.com");
    let store = Arc::new(CountingStore::with([alice.clone()]));
    let state = build_store_state(sec.clone(), store).await?;
    let app = create_test_app(state).with_routes(probe_routes).build().await;

    // Expired
    let expired = format!("Bearer {}", mint_expired_token(&alice, &sec));
    assert_eq!(probe(&app, Some(&expired)).await["userId"], Value::Null);

    // Signed with another key
    let other = bearer_header(&alice, &SecurityConfig::for_tests());
    assert_eq!(probe(&app, Some(&other)).await["userId"], Value::Null);

    // Unknown subject
    let unknown = bearer_header(&ghost, &sec);
    assert_eq!(probe(&app, Some(&unknown)).await["userId"], Value::Null);
    Ok(())
}

#[actix_web::test]
async fn gate_applied_twice_keeps_first_context() -> Result<(), Box<dyn std::error::Error>> {
    let sec = SecurityConfig::for_tests();
    let alice = identity(7, "a@x.com");
    let store = Arc::new(CountingStore::with([alice.clone()]));
    let state = build_store_state(sec.clone(), store.clone()).await?;

    let app = test::init_service(
        actix_web::App::new()
            .wrap(AuthGate)
            .wrap(AuthGate)
            .app_data(web::Data::new(state))
            .configure(probe_routes),
    )
    .await;

    let body = probe(&app, Some(&bearer_header(&alice, &sec))).await;
    assert_eq!(body["userId"], 7);
    assert_eq!(store.lookups(), 1, "inner gate must not resolve again");
    Ok(())
}

#[actix_web::test]
async fn missing_app_state_continues_anonymously() {
    let sec = SecurityConfig::for_tests();
    let alice = identity(7, "a@x.com");
    let app = test::init_service(
        actix_web::App::new()
            .wrap(AuthGate)
            .configure(probe_routes),
    )
    .await;

    let body = probe(&app, Some(&bearer_header(&alice, &sec))).await;
    assert_eq!(body["userId"], Value::Null);
}
