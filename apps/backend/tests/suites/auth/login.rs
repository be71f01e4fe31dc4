// Integration tests for registration, login and /auth/me.

use actix_web::test;
use backend_test_support::unique_helpers::unique_email;
use memshare_backend::auth::TokenVerifier;
use memshare_backend::state::security_config::SecurityConfig;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::create_test_app;
use crate::support::test_state::build_test_state_with;

// ============================================================================
// Happy Path Tests
// ============================================================================

#[actix_web::test]
async fn register_then_authenticate_then_me() -> Result<(), Box<dyn std::error::Error>> {
    let sec = SecurityConfig::for_tests();
    let state = build_test_state_with(sec.clone()).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let email = unique_email("reg");
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "firstname": "Ada",
            "lastname": "Lovelace",
            "email": format!("  {}  ", email.to_uppercase()),
            "password": "s3cret-pass"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let verifier = TokenVerifier::new(&sec);
    assert_eq!(verifier.extract_subject(&token)?, email);
    assert!(verifier.extract_user_id(&token).is_some());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/authenticate")
        .set_json(json!({ "email": email, "password": "s3cret-pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    let login_token = body["token"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {login_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let me: Value = test::read_body_json(resp).await;
    assert_eq!(me["email"], email.as_str());
    assert_eq!(me["firstname"], "Ada");
    assert_eq!(me["role"], "USER");
    assert_eq!(me["authorities"], json!(["USER"]));
    assert!(me.get("passwordHash").is_none());
    Ok(())
}

// ============================================================================
// Error Tests
// ============================================================================

#[actix_web::test]
async fn duplicate_registration_is_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with(SecurityConfig::for_tests()).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let payload = json!({ "email": "dup@x.com", "password": "long-enough" });
    for expected in [201u16, 409] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        if expected == 201 {
            assert_eq!(resp.status().as_u16(), 201);
        } else {
            assert_problem_details_structure(resp, 409, "UNIQUE_EMAIL").await;
        }
    }
    Ok(())
}

#[actix_web::test]
async fn registration_validates_input() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with(SecurityConfig::for_tests()).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let cases = [
        (json!({ "email": "no-at-sign", "password": "long-enough" }), "INVALID_EMAIL"),
        (json!({ "email": "short@x.com", "password": "short" }), "WEAK_PASSWORD"),
    ];
    for (payload, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 422, code).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;
    Ok(())
}

#[actix_web::test]
async fn bad_credentials_are_indistinguishable() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with(SecurityConfig::for_tests()).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": "bob@x.com", "password": "right-password" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 201);

    let mut details = Vec::new();
    for (email, password) in [("bob@x.com", "wrong-password"), ("nobody@x.com", "right-password")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/authenticate")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let problem = assert_problem_details_structure(resp, 401, "INVALID_CREDENTIALS").await;
        details.push(problem["detail"].clone());
    }
    assert_eq!(details[0], details[1]);
    Ok(())
}

#[actix_web::test]
async fn me_requires_authentication() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with(SecurityConfig::for_tests()).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    for header in [None, Some("Malformed xyz")] {
        let mut req = test::TestRequest::get().uri("/api/v1/auth/me");
        if let Some(value) = header {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_problem_details_structure(resp, 401, "UNAUTHORIZED").await;
    }
    Ok(())
}
