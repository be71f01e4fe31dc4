use actix_web::{web, HttpResponse};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::extractors::{CurrentIdentity, MaybeIdentity, ValidatedJson};
use crate::infra::db::require_db;
use crate::repos::memories::{Memory, MemoryUpdate};
use crate::services::memories::{self, GroupMemory, NewMemory};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoryRequest {
    pub title: String,
    pub content: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub memory_date: Option<OffsetDateTime>,
    pub location: Option<String>,
    pub is_public: Option<bool>,
    pub display_pic: Option<String>,
}

/// Partial update. Absent fields are untouched; an explicit `null` clears
/// `location` or `displayPic`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub memory_date: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub display_pic: Option<Option<String>>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateMemoryRequest> for MemoryUpdate {
    fn from(req: UpdateMemoryRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            memory_date: req.memory_date,
            location: req.location,
            is_public: req.is_public,
            display_pic: req.display_pic,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub memory_date: OffsetDateTime,
    pub location: Option<String>,
    pub is_public: bool,
    pub display_pic: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Memory> for MemoryResponse {
    fn from(m: Memory) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            content: m.content,
            memory_date: m.memory_date,
            location: m.location,
            is_public: m.is_public,
            display_pic: m.display_pic,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemoryResponse {
    #[serde(flatten)]
    pub memory: MemoryResponse,
    pub group_name: String,
}

impl From<GroupMemory> for GroupMemoryResponse {
    fn from(gm: GroupMemory) -> Self {
        Self {
            memory: gm.memory.into(),
            group_name: gm.group_name,
        }
    }
}

async fn create_memory(
    current: CurrentIdentity,
    body: ValidatedJson<CreateMemoryRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();
    let memory = memories::create(
        db,
        &current,
        NewMemory {
            title: body.title,
            content: body.content,
            memory_date: body.memory_date,
            location: body.location,
            is_public: body.is_public,
            display_pic: body.display_pic,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(MemoryResponse::from(memory)))
}

async fn get_memory(
    maybe: MaybeIdentity,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let memory = memories::get(db, maybe.context(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MemoryResponse::from(memory)))
}

async fn update_memory(
    current: CurrentIdentity,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateMemoryRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let memory =
        memories::update(db, &current, path.into_inner(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(MemoryResponse::from(memory)))
}

async fn delete_memory(
    current: CurrentIdentity,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    memories::delete(db, &current, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn my_memories(
    current: CurrentIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let list: Vec<GroupMemoryResponse> = memories::for_caller(db, &current)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(list))
}

async fn group_memories(
    current: CurrentIdentity,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let list: Vec<MemoryResponse> = memories::for_group(db, &current, path.into_inner())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(HttpResponse::Ok().json(list))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Literal segments before `/{id}`
    cfg.route("", web::post().to(create_memory))
        .route("/my-memories", web::get().to(my_memories))
        .route("/group/{group_id}", web::get().to(group_memories))
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_memory))
                .route(web::put().to(update_memory))
                .route(web::delete().to(delete_memory)),
        );
}
