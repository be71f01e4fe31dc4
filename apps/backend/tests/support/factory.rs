use memshare_backend::auth::password::hash_password;
use memshare_backend::auth::{Identity, Role};
use memshare_backend::repos::users::{self, UserCreate};
use memshare_backend::AppError;
use sea_orm::ConnectionTrait;

pub const TEST_PASSWORD: &str = "correct horse battery";

/// Insert a user whose password is [`TEST_PASSWORD`].
pub async fn seed_user(
    conn: &(impl ConnectionTrait + Send + Sync),
    email: &str,
    role: Role,
) -> Result<Identity, AppError> {
    let hash = hash_password(TEST_PASSWORD)?;
    let identity = users::create_user(
        conn,
        UserCreate::new(email, hash)
            .with_names("Test", "User")
            .with_role(role.as_str()),
    )
    .await?;
    Ok(identity)
}
