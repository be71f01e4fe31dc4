use std::collections::BTreeSet;

use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{info, warn};

use crate::auth::{AuthContext, Identity};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::repos::groups::{self, GroupCreate, MemoryGroup};
use crate::repos::users;
use crate::services::authz;

pub const MAX_GROUP_NAME_LEN: usize = 100;

/// A group together with its members.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub group: MemoryGroup,
    pub creator_email: Option<String>,
    pub members: Vec<Identity>,
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "name must not be blank",
        ));
    }
    if trimmed.chars().count() > MAX_GROUP_NAME_LEN {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("name must be at most {MAX_GROUP_NAME_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

fn dedup(ids: &[i64]) -> Vec<i64> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

async fn view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group: MemoryGroup,
) -> Result<GroupView, AppError> {
    let member_ids = groups::member_ids(conn, group.id).await?;
    let members = users::find_by_ids(conn, &member_ids).await?;
    let creator_email = members
        .iter()
        .find(|m| m.id == group.created_by)
        .map(|m| m.email.clone());
    let creator_email = match creator_email {
        Some(email) => Some(email),
        None => users::find_by_id(conn, group.created_by).await?.map(|u| u.email),
    };
    Ok(GroupView {
        group,
        creator_email,
        members,
    })
}

/// Create a group owned by the caller. The caller is always a member; unknown
/// ids in `user_ids` are skipped.
pub async fn create<C: ConnectionTrait + TransactionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    name: &str,
    description: Option<String>,
    user_ids: &[i64],
) -> Result<GroupView, AppError> {
    let name = validate_name(name)?;
    if groups::name_taken(conn, &name).await? {
        return Err(DomainError::conflict(
            ConflictKind::UniqueGroupName,
            format!("Group with name '{name}' already exists"),
        )
        .into());
    }

    let txn = conn.begin().await?;
    let group = groups::create_group(
        &txn,
        GroupCreate::new(name, ctx.user_id()).with_description(description),
    )
    .await?;

    let mut members = users::existing_ids(&txn, &dedup(user_ids)).await?;
    members.push(ctx.user_id());
    groups::add_members(&txn, group.id, &dedup(&members)).await?;
    txn.commit().await?;

    info!(group_id = group.id, user_id = ctx.user_id(), "Group created");
    view(conn, group).await
}

/// A group the caller belongs to (or any group for ADMIN).
pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    group_id: i64,
) -> Result<GroupView, AppError> {
    let group = groups::require_group(conn, group_id).await?;
    let is_member = groups::is_member(conn, group_id, ctx.user_id()).await?;
    authz::require_member_or_admin(ctx, is_member)?;
    view(conn, group).await
}

pub async fn member_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
) -> Result<Vec<GroupView>, AppError> {
    let mut views = Vec::new();
    for group in groups::groups_for_member(conn, ctx.user_id()).await? {
        views.push(view(conn, group).await?);
    }
    Ok(views)
}

pub async fn created_by_caller<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
) -> Result<Vec<GroupView>, AppError> {
    let mut views = Vec::new();
    for group in groups::groups_created_by(conn, ctx.user_id()).await? {
        views.push(view(conn, group).await?);
    }
    Ok(views)
}

async fn require_manager<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    group_id: i64,
) -> Result<MemoryGroup, AppError> {
    let group = groups::require_group(conn, group_id).await?;
    if let Err(e) = authz::require_owner_or_admin(ctx, group.created_by) {
        warn!(group_id, user_id = ctx.user_id(), "Rejected group change by non-creator");
        return Err(e);
    }
    Ok(group)
}

pub async fn add_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    group_id: i64,
    user_ids: &[i64],
) -> Result<GroupView, AppError> {
    let group = require_manager(conn, ctx, group_id).await?;
    let known = users::existing_ids(conn, &dedup(user_ids)).await?;
    let added = groups::add_members(conn, group_id, &known).await?;
    info!(group_id, added, "Users added to group");
    view(conn, group).await
}

/// Remove users from a group. The creator cannot be removed.
pub async fn remove_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    group_id: i64,
    user_ids: &[i64],
) -> Result<GroupView, AppError> {
    let group = require_manager(conn, ctx, group_id).await?;
    if user_ids.contains(&group.created_by) {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "The group creator cannot be removed",
        ));
    }
    let removed = groups::remove_members(conn, group_id, &dedup(user_ids)).await?;
    info!(group_id, removed, "Users removed from group");
    view(conn, group).await
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ctx: &AuthContext,
    group_id: i64,
) -> Result<(), AppError> {
    require_manager(conn, ctx, group_id).await?;
    groups::delete_group(conn, group_id).await?;
    info!(group_id, "Group deleted");
    Ok(())
}
