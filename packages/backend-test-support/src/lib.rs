//! Shared helpers for backend tests: logging initialization, Problem Details
//! assertions and unique test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
