//! User repository functions and the database-backed identity store.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::adapters::users_sea as users_adapter;
use crate::auth::{Identity, IdentityStore, Role};
use crate::errors::domain::DomainError;

pub use users_adapter::UserCreate;

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<Identity>, DomainError> {
    users_adapter::find_user_by_email(conn, email)
        .await?
        .map(Identity::try_from)
        .transpose()
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<Identity>, DomainError> {
    users_adapter::find_user_by_id(conn, user_id)
        .await?
        .map(Identity::try_from)
        .transpose()
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<Identity>, DomainError> {
    users_adapter::find_users_by_ids(conn, user_ids)
        .await?
        .into_iter()
        .map(Identity::try_from)
        .collect()
}

/// Ids among `user_ids` that name existing users.
pub async fn existing_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[i64],
) -> Result<Vec<i64>, DomainError> {
    Ok(users_adapter::existing_user_ids(conn, user_ids).await?)
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<Identity, DomainError> {
    let user = users_adapter::create_user(conn, dto).await?;
    Identity::try_from(user)
}

impl TryFrom<crate::entities::users::Model> for Identity {
    type Error = DomainError;

    fn try_from(model: crate::entities::users::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            role: model.role.parse::<Role>()?,
            email: model.email,
            password_hash: model.password_hash,
            firstname: model.firstname,
            lastname: model.lastname,
        })
    }
}

/// [`IdentityStore`] over the `users` table.
#[derive(Debug, Clone)]
pub struct SeaIdentityStore {
    db: DatabaseConnection,
}

impl SeaIdentityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityStore for SeaIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        find_by_email(&self.db, email).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, DomainError> {
        find_by_id(&self.db, id).await
    }
}
