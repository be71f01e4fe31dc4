use sea_orm::ConnectionTrait;
use serde_json::Map;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::auth::password::{dummy_hash, hash_password, verify_password};
use crate::auth::{Identity, TokenIssuer};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{self, UserCreate};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_NAME_LEN: usize = 50;

/// Trim, NFKC-normalize and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Normalized email, or `InvalidEmail` if it cannot be an address.
pub fn validate_email(email: &str) -> Result<String, AppError> {
    let normalized = normalize_email(email);
    match normalized.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(normalized),
        _ => Err(AppError::invalid(
            ErrorCode::InvalidEmail,
            "A valid email address is required",
        )),
    }
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::invalid(
            ErrorCode::WeakPassword,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

fn validate_name(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("{field} must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Input for [`register`].
#[derive(Clone)]
pub struct Registration {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Create a USER identity and return it with a fresh token.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    issuer: &TokenIssuer,
    input: Registration,
) -> Result<(Identity, String), AppError> {
    let email = validate_email(&input.email)?;
    validate_password(&input.password)?;
    let firstname = validate_name("firstname", &input.firstname)?;
    let lastname = validate_name("lastname", &input.lastname)?;

    if users::find_by_email(conn, &email).await?.is_some() {
        return Err(DomainError::conflict(ConflictKind::UniqueEmail, "Email already registered").into());
    }

    let password_hash = hash_password(&input.password)?;
    let identity = users::create_user(
        conn,
        UserCreate::new(email, password_hash).with_names(firstname, lastname),
    )
    .await?;

    let token = issuer.issue(&identity, Map::new())?;
    info!(user_id = identity.id, email = %Redacted(&identity.email), "User registered");
    Ok((identity, token))
}

/// Check credentials and return the identity with a fresh token.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    issuer: &TokenIssuer,
    email: &str,
    password: &str,
) -> Result<(Identity, String), AppError> {
    let email = normalize_email(email);

    let found = users::find_by_email(conn, &email).await?;
    let matches = verify_password(password, hash_to_verify(found.as_ref()));

    let identity = match found {
        Some(identity) if matches => identity,
        Some(_) => {
            security::login_failed("bad_password", &email);
            return Err(AppError::invalid_credentials());
        }
        None => {
            security::login_failed("unknown_email", &email);
            return Err(AppError::invalid_credentials());
        }
    };

    let token = issuer.issue(&identity, Map::new())?;
    info!(user_id = identity.id, "User authenticated");
    Ok((identity, token))
}

/// Stored hash of `identity`, or the dummy hash when the email is unknown.
fn hash_to_verify(identity: Option<&Identity>) -> &str {
    match identity {
        Some(identity) => &identity.password_hash,
        None => dummy_hash(),
    }
}
