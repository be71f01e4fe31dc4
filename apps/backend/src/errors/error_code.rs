//! Error codes for the MemShare backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the MemShare backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Email/password pair rejected
    InvalidCredentials,
    /// Access denied
    Forbidden,
    /// Caller is not a member of the group
    NotAMember,
    /// Caller is neither the owner nor an admin
    NotOwner,

    // Request Validation
    /// Invalid email address
    InvalidEmail,
    /// Password does not meet requirements
    WeakPassword,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Memory not found
    MemoryNotFound,
    /// Group not found
    GroupNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Unique email constraint
    UniqueEmail,
    /// Unique group name constraint
    UniqueGroupName,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::NotOwner => "NOT_OWNER",

            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MemoryNotFound => "MEMORY_NOT_FOUND",
            Self::GroupNotFound => "GROUP_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::UniqueGroupName => "UNIQUE_GROUP_NAME",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
