use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use memshare_backend::auth::{Identity, Role};
use memshare_backend::state::security_config::SecurityConfig;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::support::auth::bearer_header;
use crate::support::factory::seed_user;
use crate::support::test_state::build_test_state_with;

/// Test database plus the config needed to mint tokens against it.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub sec: SecurityConfig,
}

impl Fixture {
    /// Fresh migrated database and its app state.
    pub async fn new() -> (Self, memshare_backend::AppState) {
        let sec = SecurityConfig::for_tests();
        let state = build_test_state_with(sec.clone())
            .await
            .expect("state should build");
        let db = state.db.clone().expect("state should have a db");
        (Self { db, sec }, state)
    }

    pub async fn user(&self, email: &str) -> Identity {
        seed_user(&self.db, email, Role::User).await.expect("seed user")
    }

    pub async fn admin(&self, email: &str) -> Identity {
        seed_user(&self.db, email, Role::Admin).await.expect("seed admin")
    }

    pub fn bearer(&self, identity: &Identity) -> String {
        bearer_header(identity, &self.sec)
    }
}

/// Send `req` with an optional bearer header and return status and JSON body
/// (`Value::Null` when empty).
pub async fn send<S>(
    app: &S,
    req: test::TestRequest,
    bearer: Option<&str>,
) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = match bearer {
        Some(value) => req.insert_header(("Authorization", value)),
        None => req,
    };
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("body should be JSON")
    };
    (status, json)
}
