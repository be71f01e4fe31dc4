use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::extractors::{CurrentIdentity, ValidatedJson};
use crate::infra::db::require_db;
use crate::routes::auth::UserSummary;
use crate::services::groups::{self, GroupView};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub user_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUsersRequest {
    pub user_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: i64,
    pub creator_email: Option<String>,
    pub members: Vec<UserSummary>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<GroupView> for GroupResponse {
    fn from(view: GroupView) -> Self {
        Self {
            id: view.group.id,
            name: view.group.name,
            description: view.group.description,
            created_by: view.group.created_by,
            creator_email: view.creator_email,
            members: view.members.iter().map(UserSummary::from).collect(),
            created_at: view.group.created_at,
            updated_at: view.group.updated_at,
        }
    }
}

fn to_list(views: Vec<GroupView>) -> Vec<GroupResponse> {
    views.into_iter().map(GroupResponse::from).collect()
}

async fn create_group(
    current: CurrentIdentity,
    body: ValidatedJson<CreateGroupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();
    let view = groups::create(db, &current, &body.name, body.description, &body.user_ids).await?;
    Ok(HttpResponse::Created().json(GroupResponse::from(view)))
}

async fn get_group(
    current: CurrentIdentity,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let view = groups::get(db, &current, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(GroupResponse::from(view)))
}

async fn my_groups(
    current: CurrentIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    Ok(HttpResponse::Ok().json(to_list(groups::member_of(db, &current).await?)))
}

async fn my_created_groups(
    current: CurrentIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    Ok(HttpResponse::Ok().json(to_list(groups::created_by_caller(db, &current).await?)))
}

async fn add_users(
    current: CurrentIdentity,
    path: web::Path<i64>,
    body: ValidatedJson<GroupUsersRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let view = groups::add_users(db, &current, path.into_inner(), &body.user_ids).await?;
    Ok(HttpResponse::Ok().json(GroupResponse::from(view)))
}

async fn remove_users(
    current: CurrentIdentity,
    path: web::Path<i64>,
    body: ValidatedJson<GroupUsersRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let view = groups::remove_users(db, &current, path.into_inner(), &body.user_ids).await?;
    Ok(HttpResponse::Ok().json(GroupResponse::from(view)))
}

async fn delete_group(
    current: CurrentIdentity,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    groups::delete(db, &current, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_group))
        .route("/my-groups", web::get().to(my_groups))
        .route("/my-created-groups", web::get().to(my_created_groups))
        .service(
            web::resource("/{id}/users")
                .route(web::post().to(add_users))
                .route(web::delete().to(remove_users)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_group))
                .route(web::delete().to(delete_group)),
        );
}
