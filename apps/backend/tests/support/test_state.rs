use std::sync::Arc;

use memshare_backend::auth::IdentityStore;
use memshare_backend::infra::state::build_state;
use memshare_backend::state::app_state::AppState;
use memshare_backend::state::security_config::SecurityConfig;
use memshare_backend::AppError;

/// Fresh in-memory SQLite database, migrated.
pub const SQLITE_MEMORY: &str = "sqlite::memory:";

/// State backed by its own in-memory database.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_test_state_with(SecurityConfig::for_tests()).await
}

pub async fn build_test_state_with(security: SecurityConfig) -> Result<AppState, AppError> {
    build_state()
        .with_db(SQLITE_MEMORY)
        .with_security(security)
        .build()
        .await
}

/// State with no database; identities come from `store`.
pub async fn build_store_state(
    security: SecurityConfig,
    store: Arc<dyn IdentityStore>,
) -> Result<AppState, AppError> {
    build_state()
        .with_security(security)
        .with_identity_store(store)
        .build()
        .await
}
