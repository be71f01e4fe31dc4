use actix_web::test;
use serde_json::Value;

use crate::support::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20251019_000001_init");
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[actix_web::test]
async fn routes_without_db_answer_503() -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::Arc;

    use memshare_backend::state::security_config::SecurityConfig;

    use crate::common::assert_problem_details_structure;
    use crate::support::identity_store::CountingStore;
    use crate::support::test_state::build_store_state;

    let state =
        build_store_state(SecurityConfig::for_tests(), Arc::new(CountingStore::default())).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/v1/memories/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 503, "DB_UNAVAILABLE").await;
    Ok(())
}
