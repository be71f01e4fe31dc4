//! SeaORM adapter for user repository.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QuerySelect, Set};

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_users_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    users::Entity::find()
        .filter(users::Column::Id.is_in(user_ids.iter().copied()))
        .all(conn)
        .await
}

/// Ids among `user_ids` that belong to existing users.
pub async fn existing_user_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<i64>, sea_orm::DbErr> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    users::Entity::find()
        .select_only()
        .column(users::Column::Id)
        .filter(users::Column::Id.is_in(user_ids.iter().copied()))
        .into_tuple::<i64>()
        .all(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        firstname: Set(dto.firstname),
        lastname: Set(dto.lastname),
        role: Set(dto.role),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}
