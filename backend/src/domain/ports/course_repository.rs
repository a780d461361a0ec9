//! Port for course lookups.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CourseName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "course repository query failed: {message}",
    }
}

/// Read-only access to courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find the course whose name equals `name` exactly; lowest id wins on
    /// duplicates.
    async fn find_by_name(&self, name: &CourseName)
    -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// List every course ordered by id.
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError>;
}

/// Fixture implementation with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseRepository;

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn find_by_name(
        &self,
        _name: &CourseName,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_list_is_empty() {
        let listed = FixtureCourseRepository.list().await.expect("fixture list");
        assert!(listed.is_empty());
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = CourseRepositoryError::query("syntax error");
        assert!(err.to_string().contains("syntax error"));
    }
}
