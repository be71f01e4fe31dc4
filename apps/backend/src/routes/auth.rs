use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthContext, Identity};
use crate::error::AppError;
use crate::extractors::{CurrentIdentity, ValidatedJson};
use crate::infra::db::require_db;
use crate::services::users::{self, Registration};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public view of an identity; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub role: String,
}

impl From<&Identity> for UserSummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            firstname: identity.firstname.clone(),
            lastname: identity.lastname.clone(),
            role: identity.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserSummary,
    pub authorities: Vec<String>,
}

impl From<&AuthContext> for MeResponse {
    fn from(ctx: &AuthContext) -> Self {
        Self {
            user: UserSummary::from(ctx.identity()),
            authorities: ctx.authorities().to_vec(),
        }
    }
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();

    let (_, token) = users::register(
        db,
        &app_state.issuer(),
        Registration {
            firstname: body.firstname,
            lastname: body.lastname,
            email: body.email,
            password: body.password,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(TokenResponse { token }))
}

async fn authenticate(
    body: ValidatedJson<AuthenticateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let (_, token) =
        users::authenticate(db, &app_state.issuer(), &body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

async fn me(current: CurrentIdentity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(MeResponse::from(&*current)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/authenticate", web::post().to(authenticate))
        .route("/me", web::get().to(me));
}
