use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::{IdentityResolver, IdentityStore, TokenIssuer, TokenVerifier};
use crate::repos::users::SeaIdentityStore;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent when only the auth layer is exercised)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Identity lookup used by the authentication gate
    pub identities: Arc<dyn IdentityStore>,
}

impl AppState {
    /// Create a new AppState backed by `db` for both data and identities
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        let identities: Arc<dyn IdentityStore> = Arc::new(SeaIdentityStore::new(db.clone()));
        Self {
            db: Some(db),
            security,
            identities,
        }
    }

    /// Create an AppState with a custom identity store and no database
    pub fn with_identity_store(security: SecurityConfig, identities: Arc<dyn IdentityStore>) -> Self {
        Self {
            db: None,
            security,
            identities,
        }
    }

    pub fn issuer(&self) -> TokenIssuer {
        TokenIssuer::new(&self.security)
    }

    pub fn verifier(&self) -> TokenVerifier {
        TokenVerifier::new(&self.security)
    }

    pub fn resolver(&self) -> IdentityResolver {
        IdentityResolver::new(Arc::clone(&self.identities))
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
