//! Memory repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::memories_sea as memories_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use memories_adapter::{MemoryCreate, MemoryUpdate};

/// Memory domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Memory {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub memory_date: OffsetDateTime,
    pub location: Option<String>,
    pub is_public: bool,
    pub display_pic: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn create_memory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MemoryCreate,
) -> Result<Memory, DomainError> {
    let memory = memories_adapter::create_memory(conn, dto).await?;
    Ok(Memory::from(memory))
}

pub async fn find_memory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    memory_id: i64,
) -> Result<Option<Memory>, DomainError> {
    let memory = memories_adapter::find_memory_by_id(conn, memory_id).await?;
    Ok(memory.map(Memory::from))
}

/// Like [`find_memory`] but a miss is `NotFound`.
pub async fn require_memory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    memory_id: i64,
) -> Result<Memory, DomainError> {
    find_memory(conn, memory_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Memory, format!("Memory {memory_id} not found"))
    })
}

pub async fn list_by_owners<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<Memory>, DomainError> {
    let memories = memories_adapter::find_memories_by_owners(conn, user_ids).await?;
    Ok(memories.into_iter().map(Memory::from).collect())
}

pub async fn update_memory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    memory_id: i64,
    dto: MemoryUpdate,
) -> Result<Memory, DomainError> {
    let current = memories_adapter::find_memory_by_id(conn, memory_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Memory, format!("Memory {memory_id} not found"))
        })?;
    let updated = memories_adapter::update_memory(conn, current, dto).await?;
    Ok(Memory::from(updated))
}

pub async fn delete_memory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    memory_id: i64,
) -> Result<(), DomainError> {
    match memories_adapter::delete_memory(conn, memory_id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Memory,
            format!("Memory {memory_id} not found"),
        )),
        _ => Ok(()),
    }
}

impl From<crate::entities::memories::Model> for Memory {
    fn from(model: crate::entities::memories::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            content: model.content,
            memory_date: model.memory_date,
            location: model.location,
            is_public: model.is_public,
            display_pic: model.display_pic,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
