use std::sync::Arc;

use crate::auth::IdentityStore;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    database_url: Option<String>,
    identity_store: Option<Arc<dyn IdentityStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::for_tests(),
            database_url: None,
            identity_store: None,
        }
    }

    /// Connect to `url` (and migrate it) when building.
    pub fn with_db(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Serve identities from `store` instead of the database.
    pub fn with_identity_store(mut self, store: Arc<dyn IdentityStore>) -> Self {
        self.identity_store = Some(store);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match (self.database_url, self.identity_store) {
            (Some(url), store) => {
                // single entrypoint: build + migrate
                let conn = bootstrap_db(&url).await?;
                let mut state = AppState::new(conn, self.security_config);
                if let Some(store) = store {
                    state.identities = store;
                }
                Ok(state)
            }
            (None, Some(store)) => Ok(AppState::with_identity_store(self.security_config, store)),
            (None, None) => Err(AppError::config(
                "state needs a database or an identity store",
            )),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
