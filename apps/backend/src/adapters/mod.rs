//! SeaORM adapters. Functions return `DbErr`; the repos layer maps to `DomainError`.

pub mod groups_sea;
pub mod memories_sea;
pub mod users_sea;
