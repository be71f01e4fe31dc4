//! SeaORM adapter for group and membership repository.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{group_members, memory_groups};

pub mod dto;

pub use dto::GroupCreate;

pub async fn create_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GroupCreate,
) -> Result<memory_groups::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let group_active = memory_groups::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        created_by: Set(dto.created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };

    group_active.insert(conn).await
}

pub async fn find_group_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Option<memory_groups::Model>, sea_orm::DbErr> {
    memory_groups::Entity::find_by_id(group_id).one(conn).await
}

pub async fn find_group_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<memory_groups::Model>, sea_orm::DbErr> {
    memory_groups::Entity::find()
        .filter(memory_groups::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn find_groups_created_by<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<memory_groups::Model>, sea_orm::DbErr> {
    memory_groups::Entity::find()
        .filter(memory_groups::Column::CreatedBy.eq(user_id))
        .order_by_asc(memory_groups::Column::Id)
        .all(conn)
        .await
}

/// Groups `user_id` is a member of.
pub async fn find_groups_for_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<memory_groups::Model>, sea_orm::DbErr> {
    let group_ids: Vec<i64> = group_members::Entity::find()
        .select_only()
        .column(group_members::Column::GroupId)
        .filter(group_members::Column::UserId.eq(user_id))
        .into_tuple()
        .all(conn)
        .await?;

    if group_ids.is_empty() {
        return Ok(Vec::new());
    }

    memory_groups::Entity::find()
        .filter(memory_groups::Column::Id.is_in(group_ids))
        .order_by_asc(memory_groups::Column::Id)
        .all(conn)
        .await
}

pub async fn find_member_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    group_members::Entity::find()
        .select_only()
        .column(group_members::Column::UserId)
        .filter(group_members::Column::GroupId.eq(group_id))
        .order_by_asc(group_members::Column::UserId)
        .into_tuple()
        .all(conn)
        .await
}

pub async fn is_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let count = group_members::Entity::find()
        .filter(group_members::Column::GroupId.eq(group_id))
        .filter(group_members::Column::UserId.eq(user_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

/// Insert memberships, skipping ones that already exist. Returns rows inserted.
pub async fn add_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if user_ids.is_empty() {
        return Ok(0);
    }
    let now = time::OffsetDateTime::now_utc();
    let rows = user_ids.iter().map(|&user_id| group_members::ActiveModel {
        group_id: Set(group_id),
        user_id: Set(user_id),
        joined_at: Set(now),
    });

    group_members::Entity::insert_many(rows)
        .on_conflict(
            OnConflict::columns([group_members::Column::GroupId, group_members::Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
}

pub async fn remove_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
    user_ids: &[i64],
) -> Result<u64, sea_orm::DbErr> {
    if user_ids.is_empty() {
        return Ok(0);
    }
    let result = group_members::Entity::delete_many()
        .filter(group_members::Column::GroupId.eq(group_id))
        .filter(group_members::Column::UserId.is_in(user_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Delete a group and its memberships.
pub async fn delete_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    group_members::Entity::delete_many()
        .filter(group_members::Column::GroupId.eq(group_id))
        .exec(conn)
        .await?;
    let result = memory_groups::Entity::delete_by_id(group_id).exec(conn).await?;
    Ok(result.rows_affected)
}
