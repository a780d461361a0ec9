//! Driving port for course catalogue reads.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Error};

/// Domain use-case port for browsing courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesQuery: Send + Sync {
    /// All courses ordered by id; `not_found` when there are none.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;

    /// A single course; `not_found` when the id does not resolve.
    async fn get_course(&self, id: CourseId) -> Result<Course, Error>;
}

/// Fixture query with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCoursesQuery;

#[async_trait]
impl CoursesQuery for FixtureCoursesQuery {
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        Err(Error::not_found("No courses found."))
    }

    async fn get_course(&self, id: CourseId) -> Result<Course, Error> {
        Err(Error::not_found(format!("Course with ID {id} not found.")))
    }
}
