//! Port for enrollment persistence.
//!
//! Adapters must make [`EnrollmentRepository::insert_within_limit`] atomic:
//! the active-enrollment count and the insert happen as one unit so two
//! concurrent requests for the same student cannot both slip under the
//! limit.

use async_trait::async_trait;

use crate::domain::{CourseId, Enrollment, EnrollmentListing, NewEnrollment, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enrollment repository adapters.
    pub enum EnrollmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "enrollment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "enrollment repository query failed: {message}",
        /// The store rejected a second enrollment for the same pair.
        Duplicate { message: String } =>
            "enrollment already exists: {message}",
    }
}

/// Result of a guarded insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The enrollment was stored.
    Inserted(Enrollment),
    /// The student already holds `active` active enrollments.
    LimitReached {
        /// Active enrollments observed inside the write.
        active: u32,
    },
}

/// Access to enrollment records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Count the student's enrollments whose status is active.
    async fn count_active_for_student(
        &self,
        student_id: UserId,
    ) -> Result<u32, EnrollmentRepositoryError>;

    /// Whether any enrollment, in any status, links the pair.
    async fn exists_for_pair(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, EnrollmentRepositoryError>;

    /// Insert `draft` as an active enrollment unless the student already has
    /// `limit` active enrollments.
    ///
    /// Returns [`EnrollmentRepositoryError::Duplicate`] when the pair already
    /// exists in the store.
    async fn insert_within_limit(
        &self,
        draft: &NewEnrollment,
        limit: u32,
    ) -> Result<InsertOutcome, EnrollmentRepositoryError>;

    /// All enrollments, ordered by id, with their parties' display names.
    async fn list_with_parties(&self) -> Result<Vec<EnrollmentListing>, EnrollmentRepositoryError>;
}

/// Fixture implementation holding no enrollments and refusing writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentRepository;

#[async_trait]
impl EnrollmentRepository for FixtureEnrollmentRepository {
    async fn count_active_for_student(
        &self,
        _student_id: UserId,
    ) -> Result<u32, EnrollmentRepositoryError> {
        Ok(0)
    }

    async fn exists_for_pair(
        &self,
        _student_id: UserId,
        _course_id: CourseId,
    ) -> Result<bool, EnrollmentRepositoryError> {
        Ok(false)
    }

    async fn insert_within_limit(
        &self,
        _draft: &NewEnrollment,
        _limit: u32,
    ) -> Result<InsertOutcome, EnrollmentRepositoryError> {
        Err(EnrollmentRepositoryError::query(
            "fixture repository does not persist enrollments",
        ))
    }

    async fn list_with_parties(&self) -> Result<Vec<EnrollmentListing>, EnrollmentRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_refuses_writes() {
        let draft = NewEnrollment {
            student_id: UserId::new(7),
            course_id: CourseId::new(3),
            enrolled_on: NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date"),
        };

        let result = FixtureEnrollmentRepository
            .insert_within_limit(&draft, 3)
            .await;

        assert!(matches!(result, Err(EnrollmentRepositoryError::Query { .. })));
    }

    #[rstest]
    fn duplicate_error_formats_message() {
        let err = EnrollmentRepositoryError::duplicate("student 7, course 3");
        assert_eq!(
            err.to_string(),
            "enrollment already exists: student 7, course 3"
        );
    }
}
