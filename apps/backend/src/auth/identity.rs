use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Granted authorities implied by the role.
    pub fn authorities(&self) -> Vec<String> {
        vec![self.as_str().to_string()]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// A registered user as seen by the auth layer.
///
/// The subject placed in tokens is the normalized email.
#[derive(Clone, PartialEq)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub firstname: String,
    pub lastname: String,
}

impl Identity {
    pub fn subject(&self) -> &str {
        &self.email
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &Redacted(&self.email))
            .field("role", &self.role)
            .field("password_hash", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
