//! DTOs for groups_sea adapter.

/// DTO for creating a new group.
#[derive(Debug, Clone)]
pub struct GroupCreate {
    pub name: String,
    pub description: Option<String>,
    pub created_by: i64,
}

impl GroupCreate {
    pub fn new(name: impl Into<String>, created_by: i64) -> Self {
        Self {
            name: name.into(),
            description: None,
            created_by,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}
