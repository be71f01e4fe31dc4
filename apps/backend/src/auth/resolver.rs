use std::sync::Arc;

use async_trait::async_trait;

use super::error::AuthError;
use super::identity::Identity;
use crate::errors::domain::DomainError;

/// Lookup of stored identities.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find by normalized email (the token subject).
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, DomainError>;
}

/// Maps a verified token subject to the identity it names.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn IdentityStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, subject: &str) -> Result<Identity, AuthError> {
        self.store
            .find_by_email(subject)
            .await
            .map_err(AuthError::IdentityStore)?
            .ok_or(AuthError::IdentityNotFound)
    }
}
