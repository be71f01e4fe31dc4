//! Unique test data so tests sharing a database never collide.

use uuid::Uuid;

/// `{prefix}-{short uuid}`.
pub fn unique_str(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &id[..12])
}

/// `{prefix}-{short uuid}@example.test`.
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.test", unique_str(prefix))
}
