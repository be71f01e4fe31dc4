//! SeaORM adapter for memory repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::memories;

pub mod dto;

pub use dto::{MemoryCreate, MemoryUpdate};

pub async fn create_memory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MemoryCreate,
) -> Result<memories::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let memory_active = memories::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        title: Set(dto.title),
        content: Set(dto.content),
        memory_date: Set(dto.memory_date),
        location: Set(dto.location),
        is_public: Set(dto.is_public),
        display_pic: Set(dto.display_pic),
        created_at: Set(now),
        updated_at: Set(now),
    };

    memory_active.insert(conn).await
}

pub async fn find_memory_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    memory_id: i64,
) -> Result<Option<memories::Model>, sea_orm::DbErr> {
    memories::Entity::find_by_id(memory_id).one(conn).await
}

/// Memories owned by any of `user_ids`, newest `memory_date` first.
pub async fn find_memories_by_owners<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<memories::Model>, sea_orm::DbErr> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    memories::Entity::find()
        .filter(memories::Column::UserId.is_in(user_ids.iter().copied()))
        .order_by_desc(memories::Column::MemoryDate)
        .order_by_desc(memories::Column::Id)
        .all(conn)
        .await
}

pub async fn update_memory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    current: memories::Model,
    dto: MemoryUpdate,
) -> Result<memories::Model, sea_orm::DbErr> {
    let mut memory: memories::ActiveModel = current.into();
    if let Some(title) = dto.title {
        memory.title = Set(title);
    }
    if let Some(content) = dto.content {
        memory.content = Set(content);
    }
    if let Some(memory_date) = dto.memory_date {
        memory.memory_date = Set(memory_date);
    }
    if let Some(location) = dto.location {
        memory.location = Set(location);
    }
    if let Some(is_public) = dto.is_public {
        memory.is_public = Set(is_public);
    }
    if let Some(display_pic) = dto.display_pic {
        memory.display_pic = Set(display_pic);
    }
    memory.updated_at = Set(time::OffsetDateTime::now_utc());
    memory.update(conn).await
}

pub async fn delete_memory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    memory_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = memories::Entity::delete_by_id(memory_id).exec(conn).await?;
    Ok(result.rows_affected)
}
