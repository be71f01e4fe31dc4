//! DTOs for memories_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new memory.
#[derive(Debug, Clone)]
pub struct MemoryCreate {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub memory_date: OffsetDateTime,
    pub location: Option<String>,
    pub is_public: bool,
    pub display_pic: Option<String>,
}

/// DTO for a partial update; `None` leaves the column untouched.
///
/// `location` and `display_pic` are nullable, so `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct MemoryUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub memory_date: Option<OffsetDateTime>,
    pub location: Option<Option<String>>,
    pub is_public: Option<bool>,
    pub display_pic: Option<Option<String>>,
}
