use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::AuthContext;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::groups;
use crate::repos::memories::{self, Memory, MemoryCreate, MemoryUpdate};
use crate::services::authz;

pub const MAX_TITLE_LEN: usize = 50;
pub const MAX_CONTENT_LEN: usize = 500;
pub const MAX_LOCATION_LEN: usize = 50;

/// Fields accepted when creating a memory.
#[derive(Debug, Clone)]
pub struct NewMemory {
    pub title: String,
    pub content: String,
    pub memory_date: Option<OffsetDateTime>,
    pub location: Option<String>,
    pub is_public: Option<bool>,
    pub display_pic: Option<String>,
}

/// A memory seen through one of the caller's groups.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMemory {
    pub memory: Memory,
    pub group_name: String,
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("{field} must not be blank"),
        ));
    }
    check_len(field, value, max)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    input: NewMemory,
) -> Result<Memory, AppError> {
    check_text("title", &input.title, MAX_TITLE_LEN)?;
    check_text("content", &input.content, MAX_CONTENT_LEN)?;
    if let Some(location) = &input.location {
        check_len("location", location, MAX_LOCATION_LEN)?;
    }

    let memory = memories::create_memory(
        conn,
        MemoryCreate {
            user_id: ctx.user_id(),
            title: input.title,
            content: input.content,
            memory_date: input.memory_date.unwrap_or_else(OffsetDateTime::now_utc),
            location: input.location,
            is_public: input.is_public.unwrap_or(false),
            display_pic: input.display_pic,
        },
    )
    .await?;

    info!(memory_id = memory.id, user_id = ctx.user_id(), "Memory created");
    Ok(memory)
}

/// Fetch a memory the caller (possibly anonymous) may see.
pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: Option<&AuthContext>,
    memory_id: i64,
) -> Result<Memory, AppError> {
    let memory = memories::require_memory(conn, memory_id).await?;
    authz::require_visible(ctx, memory.user_id, memory.is_public)?;
    Ok(memory)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    memory_id: i64,
    changes: MemoryUpdate,
) -> Result<Memory, AppError> {
    if let Some(title) = &changes.title {
        check_text("title", title, MAX_TITLE_LEN)?;
    }
    if let Some(content) = &changes.content {
        check_text("content", content, MAX_CONTENT_LEN)?;
    }
    if let Some(Some(location)) = &changes.location {
        check_len("location", location, MAX_LOCATION_LEN)?;
    }

    let memory = memories::require_memory(conn, memory_id).await?;
    if let Err(e) = authz::require_owner(ctx, memory.user_id) {
        warn!(memory_id, user_id = ctx.user_id(), "Rejected memory update by non-owner");
        return Err(e);
    }

    let updated = memories::update_memory(conn, memory_id, changes).await?;
    info!(memory_id, "Memory updated");
    Ok(updated)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    memory_id: i64,
) -> Result<(), AppError> {
    let memory = memories::require_memory(conn, memory_id).await?;
    if let Err(e) = authz::require_owner_or_admin(ctx, memory.user_id) {
        warn!(memory_id, user_id = ctx.user_id(), "Rejected memory delete");
        return Err(e);
    }
    memories::delete_memory(conn, memory_id).await?;
    info!(memory_id, "Memory deleted");
    Ok(())
}

/// Memories of every member of a group the caller belongs to, newest first.
pub async fn for_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    group_id: i64,
) -> Result<Vec<Memory>, AppError> {
    groups::require_group(conn, group_id).await?;
    authz::require_member(groups::is_member(conn, group_id, ctx.user_id()).await?)?;

    let member_ids = groups::member_ids(conn, group_id).await?;
    Ok(memories::list_by_owners(conn, &member_ids).await?)
}

/// Memories visible through each of the caller's groups, tagged with the
/// group name and sorted by `memory_date`, newest first.
///
/// A memory shared through two groups appears once per group.
pub async fn for_caller<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
) -> Result<Vec<GroupMemory>, AppError> {
    let groups = groups::groups_for_member(conn, ctx.user_id()).await?;
    debug!(user_id = ctx.user_id(), groups = groups.len(), "Collecting group memories");

    let mut all = Vec::new();
    for group in groups {
        let member_ids = groups::member_ids(conn, group.id).await?;
        for memory in memories::list_by_owners(conn, &member_ids).await? {
            all.push(GroupMemory {
                memory,
                group_name: group.name.clone(),
            });
        }
    }

    all.sort_by(|a, b| b.memory.memory_date.cmp(&a.memory.memory_date));
    Ok(all)
}
