//! Driving port for enrolling students.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    CompletionStatus, CourseId, Enrollment, EnrollmentId, EnrollmentReceipt, EnrollmentRequest,
    Error, UserId,
};

/// Driving port for enrollment writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Enroll the named student in the named course.
    ///
    /// Failures are reported with these codes:
    /// - `not_found` when the student or course does not resolve,
    /// - `business_rule_violation` when the student is at the active limit,
    /// - `conflict` when the pair is already enrolled,
    /// - `service_unavailable` or `internal_error` for store faults.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use registrar::domain::EnrollmentRequest;
    /// # use registrar::domain::ports::{EnrollmentCommand, FixtureEnrollmentCommand};
    /// # async fn example() -> Result<(), registrar::domain::Error> {
    /// let request = EnrollmentRequest::from_parts(
    ///     Some("Ada Lovelace".to_owned()),
    ///     Some("Algorithms 101".to_owned()),
    /// )
    /// .expect("both names present");
    /// let receipt = FixtureEnrollmentCommand.enroll(request).await?;
    /// assert_eq!(receipt.student_name.as_ref(), "Ada Lovelace");
    /// # Ok(())
    /// # }
    /// ```
    async fn enroll(&self, request: EnrollmentRequest) -> Result<EnrollmentReceipt, Error>;
}

/// Fixture command that accepts every request without touching a store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentCommand;

#[async_trait]
impl EnrollmentCommand for FixtureEnrollmentCommand {
    async fn enroll(&self, request: EnrollmentRequest) -> Result<EnrollmentReceipt, Error> {
        let enrolled_on = NaiveDate::from_ymd_opt(2024, 9, 1)
            .ok_or_else(|| Error::internal("invalid fixture enrollment date"))?;
        Ok(EnrollmentReceipt {
            enrollment: Enrollment {
                id: EnrollmentId::new(1),
                student_id: UserId::new(1),
                course_id: CourseId::new(1),
                enrolled_on,
                status: CompletionStatus::Active,
            },
            student_name: request.student_name,
            course_name: request.course_name,
        })
    }
}
