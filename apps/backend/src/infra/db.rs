use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Environment variable holding the database connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

pub fn db_url_from_env() -> Result<String, AppError> {
    std::env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::config(format!("{DATABASE_URL_ENV} must be set")))
}

fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite") && (url.contains(":memory:") || url.contains("mode=memory"))
}

/// Connect to `url`. This function does NOT run any migrations.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);
    // Every pooled connection to an in-memory SQLite URL is its own database.
    if is_sqlite_memory(url) {
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Connect to `url` and apply pending migrations.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "Database ready");
    Ok(conn)
}

/// Database connection of `state`, or `DbUnavailable` when none is configured.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db
        .as_ref()
        .ok_or_else(|| AppError::DbUnavailable {
            detail: "no database configured".to_string(),
        })
}
