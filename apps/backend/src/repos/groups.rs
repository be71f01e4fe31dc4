//! Group and membership repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::groups_sea as groups_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use groups_adapter::GroupCreate;

/// Memory group domain model
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryGroup {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn create_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GroupCreate,
) -> Result<MemoryGroup, DomainError> {
    let group = groups_adapter::create_group(conn, dto).await?;
    Ok(MemoryGroup::from(group))
}

pub async fn find_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Option<MemoryGroup>, DomainError> {
    let group = groups_adapter::find_group_by_id(conn, group_id).await?;
    Ok(group.map(MemoryGroup::from))
}

/// Like [`find_group`] but a miss is `NotFound`.
pub async fn require_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<MemoryGroup, DomainError> {
    find_group(conn, group_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Group, format!("Group {group_id} not found"))
    })
}

pub async fn name_taken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<bool, DomainError> {
    Ok(groups_adapter::find_group_by_name(conn, name).await?.is_some())
}

pub async fn groups_created_by<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<MemoryGroup>, DomainError> {
    let groups = groups_adapter::find_groups_created_by(conn, user_id).await?;
    Ok(groups.into_iter().map(MemoryGroup::from).collect())
}

pub async fn groups_for_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<MemoryGroup>, DomainError> {
    let groups = groups_adapter::find_groups_for_member(conn, user_id).await?;
    Ok(groups.into_iter().map(MemoryGroup::from).collect())
}

pub async fn member_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(groups_adapter::find_member_ids(conn, group_id).await?)
}

pub async fn is_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_id: i64,
) -> Result<bool, DomainError> {
    Ok(groups_adapter::is_member(conn, group_id, user_id).await?)
}

pub async fn add_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_ids: &[i64],
) -> Result<u64, DomainError> {
    Ok(groups_adapter::add_members(conn, group_id, user_ids).await?)
}

pub async fn remove_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_ids: &[i64],
) -> Result<u64, DomainError> {
    Ok(groups_adapter::remove_members(conn, group_id, user_ids).await?)
}

pub async fn delete_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<(), DomainError> {
    match groups_adapter::delete_group(conn, group_id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Group,
            format!("Group {group_id} not found"),
        )),
        _ => Ok(()),
    }
}

impl From<crate::entities::memory_groups::Model> for MemoryGroup {
    fn from(model: crate::entities::memory_groups::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
