//! Driving port for student directory reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for browsing students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// All students ordered by id; `not_found` when there are none.
    async fn list_students(&self) -> Result<Vec<User>, Error>;

    /// A single student; `not_found` when the id does not resolve to a
    /// student account.
    async fn get_student(&self, id: UserId) -> Result<User, Error>;
}

/// Fixture query with no students.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudentsQuery;

#[async_trait]
impl StudentsQuery for FixtureStudentsQuery {
    async fn list_students(&self) -> Result<Vec<User>, Error> {
        Err(Error::not_found("No students found."))
    }

    async fn get_student(&self, id: UserId) -> Result<User, Error> {
        Err(Error::not_found(format!("Student with ID {id} not found.")))
    }
}
