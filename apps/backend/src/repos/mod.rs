//! Repository functions for the domain layer (generic over `ConnectionTrait`).

pub mod groups;
pub mod memories;
pub mod users;
