use thiserror::Error;

use crate::errors::domain::DomainError;

/// Why a token or identity was rejected.
///
/// Everything except [`AuthError::Signing`] and [`AuthError::IdentityStore`]
/// is a client-side failure that the gate treats as "no identity".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("malformed token")]
    Malformed,
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token subject does not match identity")]
    SubjectMismatch,
    #[error("no identity for token subject")]
    IdentityNotFound,
    #[error("token signing failed: {0}")]
    Signing(String),
    #[error("identity lookup failed: {0}")]
    IdentityStore(DomainError),
}

impl AuthError {
    /// Short machine-readable reason used in security logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Malformed => "malformed",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "expired",
            AuthError::SubjectMismatch => "subject_mismatch",
            AuthError::IdentityNotFound => "identity_not_found",
            AuthError::Signing(_) => "signing_failed",
            AuthError::IdentityStore(_) => "identity_store",
        }
    }
}
