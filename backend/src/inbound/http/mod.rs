//! HTTP inbound adapter exposing REST endpoints.

pub mod courses;
pub mod enrollments;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
