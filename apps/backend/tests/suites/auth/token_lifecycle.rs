// End-to-end token lifecycle: issue, verify, expire.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use actix_web::test as actix_test;
use memshare_backend::auth::{AuthError, TokenIssuer, TokenVerifier};
use memshare_backend::state::security_config::{SecurityConfig, SigningKey};
use serde_json::Map;

use crate::common::assert_problem_details_structure;
use crate::support::create_test_app;
use crate::support::identity_store::{identity, CountingStore};
use crate::support::test_state::build_store_state;

#[test]
fn token_for_user_seven_expires_after_ttl() {
    let sec = SecurityConfig::for_tests().with_ttl(Duration::from_millis(1000));
    let issuer = TokenIssuer::new(&sec);
    let verifier = TokenVerifier::new(&sec);
    let alice = identity(7, "a@x.com");

    let now = SystemTime::now();
    let token = issuer.issue_at(&alice, Map::new(), now).unwrap();

    assert!(verifier.verify_at(&token, Some(&alice), now).is_ok());
    assert_eq!(verifier.extract_user_id(&token), Some(7));

    let just_before = now + Duration::from_millis(999);
    assert!(verifier.is_valid_at(&token, &alice, just_before));

    let at_expiry = now + Duration::from_millis(1000);
    assert_eq!(
        verifier.verify_at(&token, Some(&alice), at_expiry).unwrap_err(),
        AuthError::Expired
    );
}

#[test]
fn raw_secret_fallback_signs_and_verifies() {
    let raw = SecurityConfig::new("not-base64!!");
    let token = TokenIssuer::new(&raw)
        .issue(&identity(1, "a@x.com"), Map::new())
        .unwrap();
    assert!(TokenVerifier::new(&raw).verify(&token, None).is_ok());

    let same_bytes = SecurityConfig {
        signing_key: Arc::new(SigningKey::raw("not-base64!!")),
        token_ttl: raw.token_ttl,
    };
    assert!(TokenVerifier::new(&same_bytes).verify(&token, None).is_ok());

    // Valid base64 text signs with its decoded bytes, not its text
    let encoded = SecurityConfig::new("c2VjcmV0");
    let token = TokenIssuer::new(&encoded)
        .issue(&identity(1, "a@x.com"), Map::new())
        .unwrap();
    let as_text = SecurityConfig {
        signing_key: Arc::new(SigningKey::raw("c2VjcmV0")),
        token_ttl: encoded.token_ttl,
    };
    let as_decoded = SecurityConfig {
        signing_key: Arc::new(SigningKey::raw("secret")),
        token_ttl: encoded.token_ttl,
    };
    assert_eq!(
        TokenVerifier::new(&as_text).verify(&token, None).unwrap_err(),
        AuthError::InvalidSignature
    );
    assert!(TokenVerifier::new(&as_decoded).verify(&token, None).is_ok());
}

#[actix_web::test]
async fn expired_token_is_anonymous_at_the_edge() -> Result<(), Box<dyn std::error::Error>> {
    let sec = SecurityConfig::for_tests().with_ttl(Duration::from_millis(1000));
    let alice = identity(7, "a@x.com");
    let state = build_store_state(sec.clone(), Arc::new(CountingStore::with([alice.clone()]))).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let issuer = TokenIssuer::new(&sec);
    let fresh = issuer.issue(&alice, Map::new())?;
    let stale = issuer.issue_at(
        &alice,
        Map::new(),
        SystemTime::now() - Duration::from_millis(1000),
    )?;

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {fresh}")))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {stale}")))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "UNAUTHORIZED").await;
    Ok(())
}
