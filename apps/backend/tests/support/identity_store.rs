use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use memshare_backend::auth::{Identity, IdentityStore, Role};
use memshare_backend::errors::DomainError;

/// In-memory identity store counting `find_by_email` lookups.
#[derive(Default)]
pub struct CountingStore {
    by_email: HashMap<String, Identity>,
    lookups: AtomicUsize,
}

impl CountingStore {
    pub fn with(identities: impl IntoIterator<Item = Identity>) -> Self {
        Self {
            by_email: identities
                .into_iter()
                .map(|i| (i.email.clone(), i))
                .collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityStore for CountingStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.by_email.get(email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, DomainError> {
        Ok(self.by_email.values().find(|i| i.id == id).cloned())
    }
}

pub fn identity(id: i64, email: &str) -> Identity {
    Identity {
        id,
        email: email.to_string(),
        password_hash: String::new(),
        role: Role::User,
        firstname: "Test".to_string(),
        lastname: "User".to_string(),
    }
}
