//! Argon2id password hashing.

use std::sync::LazyLock;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AppError;

/// Hash `plain` into a PHC string with a random 16-byte salt.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::internal(format!("salt encoding failed: {e}")))?;

    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

/// Whether `plain` matches the stored PHC `hash`. Unparseable hashes never match.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Verified in place of a stored hash when no account matches.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("memshare-no-such-account").unwrap_or_default());

pub(crate) fn dummy_hash() -> &'static str {
    &DUMMY_HASH
}
