//! DTOs for users_sea adapter.

/// DTO for creating a new user.
#[derive(Clone)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub firstname: String,
    pub lastname: String,
    pub role: String,
}

impl UserCreate {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            firstname: String::new(),
            lastname: String::new(),
            role: "USER".to_string(),
        }
    }

    pub fn with_names(mut self, firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        self.firstname = firstname.into();
        self.lastname = lastname.into();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}
