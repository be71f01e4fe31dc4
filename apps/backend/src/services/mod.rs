//! Domain services. Each takes a connection and the caller's context.

pub mod authz;
pub mod groups;
pub mod memories;
pub mod users;
