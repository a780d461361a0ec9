//! Enrollment domain service.
//!
//! Composes the identity resolver, eligibility checker and writer into the
//! enrollment driving ports. Checks run in a fixed order so the reported
//! rejection is deterministic:
//! 1. the student resolves,
//! 2. the student is under the active cap,
//! 3. the course resolves,
//! 4. the pair is not already enrolled,
//! 5. the guarded write succeeds.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::eligibility::{Eligibility, EligibilityChecker, Rejection};
use super::enrollment_writer::{EnrollmentWriter, WriteFailure};
use super::identity_resolver::IdentityResolver;
use super::ports::{
    CourseRepository, EnrollmentCommand, EnrollmentQuery, EnrollmentRepository, UserRepository,
};
use super::{
    ACTIVE_ENROLLMENT_LIMIT, EnrollmentError, EnrollmentReceipt, EnrollmentRequest,
    EnrollmentView, Error, StoreFailure,
};

/// Enrollment service implementing [`EnrollmentCommand`] and
/// [`EnrollmentQuery`].
pub struct EnrollmentService<U, C, E> {
    resolver: IdentityResolver<U, C>,
    checker: EligibilityChecker<E>,
    writer: EnrollmentWriter<E>,
    enrollments: Arc<E>,
}

impl<U, C, E> Clone for EnrollmentService<U, C, E> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            checker: self.checker.clone(),
            writer: self.writer.clone(),
            enrollments: Arc::clone(&self.enrollments),
        }
    }
}

impl<U, C, E> EnrollmentService<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    /// Create a service enforcing [`ACTIVE_ENROLLMENT_LIMIT`].
    pub fn new(users: Arc<U>, courses: Arc<C>, enrollments: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self::with_limit(users, courses, enrollments, clock, ACTIVE_ENROLLMENT_LIMIT)
    }

    /// Create a service with an explicit active-enrollment cap.
    pub fn with_limit(
        users: Arc<U>,
        courses: Arc<C>,
        enrollments: Arc<E>,
        clock: Arc<dyn Clock>,
        limit: u32,
    ) -> Self {
        Self {
            resolver: IdentityResolver::new(users, courses),
            checker: EligibilityChecker::new(Arc::clone(&enrollments), limit),
            writer: EnrollmentWriter::new(Arc::clone(&enrollments), clock, limit),
            enrollments,
        }
    }

    /// Enroll a student, returning the stored enrollment on success.
    pub async fn enroll_student(
        &self,
        request: &EnrollmentRequest,
    ) -> Result<EnrollmentReceipt, EnrollmentError> {
        let result = self.try_enroll(request).await;
        if let Err(err) = &result {
            info!(
                student = %request.student_name,
                course = %request.course_name,
                reason = err.reason(),
                "enrollment rejected"
            );
        }
        result
    }

    async fn try_enroll(
        &self,
        request: &EnrollmentRequest,
    ) -> Result<EnrollmentReceipt, EnrollmentError> {
        let student = request.student_name.to_string();
        let course = request.course_name.to_string();
        let limit = self.checker.limit();

        let student_id = self.resolver.resolve_student(&request.student_name).await?;
        if let Eligibility::Rejected(rejection) = self.checker.check_capacity(student_id).await? {
            return Err(rejection_error(rejection, student, course));
        }

        let course_id = self.resolver.resolve_course(&request.course_name).await?;
        if let Eligibility::Rejected(rejection) = self
            .checker
            .check_duplicate(student_id, course_id)
            .await?
        {
            return Err(rejection_error(rejection, student, course));
        }

        let enrollment = self
            .writer
            .commit_enrollment(student_id, course_id)
            .await
            .map_err(|failure| match failure {
                WriteFailure::ConstraintViolation => EnrollmentError::ConstraintViolation {
                    student: student.clone(),
                    course: course.clone(),
                },
                WriteFailure::LimitReached { .. } => {
                    EnrollmentError::ActiveEnrollmentLimitExceeded {
                        student: student.clone(),
                        limit,
                    }
                }
                WriteFailure::Store(store) => EnrollmentError::Store(store),
            })?;

        info!(
            enrollment_id = %enrollment.id,
            %student_id,
            %course_id,
            "student enrolled"
        );
        Ok(EnrollmentReceipt {
            enrollment,
            student_name: request.student_name.clone(),
            course_name: request.course_name.clone(),
        })
    }

    /// Every enrollment as a display-ready view, ordered by id.
    pub async fn list_enrollment_views(&self) -> Result<Vec<EnrollmentView>, EnrollmentError> {
        let listings = self
            .enrollments
            .list_with_parties()
            .await
            .map_err(StoreFailure::from)?;
        if listings.is_empty() {
            return Err(EnrollmentError::NoEnrollments);
        }
        Ok(listings.into_iter().map(EnrollmentView::from).collect())
    }
}

fn rejection_error(rejection: Rejection, student: String, course: String) -> EnrollmentError {
    match rejection {
        Rejection::ActiveEnrollmentLimitExceeded { limit, .. } => {
            EnrollmentError::ActiveEnrollmentLimitExceeded { student, limit }
        }
        Rejection::AlreadyEnrolled => EnrollmentError::AlreadyEnrolled { student, course },
    }
}

#[async_trait]
impl<U, C, E> EnrollmentCommand for EnrollmentService<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn enroll(&self, request: EnrollmentRequest) -> Result<EnrollmentReceipt, Error> {
        self.enroll_student(&request).await.map_err(Error::from)
    }
}

#[async_trait]
impl<U, C, E> EnrollmentQuery for EnrollmentService<U, C, E>
where
    U: UserRepository,
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn list_enrollments(&self) -> Result<Vec<EnrollmentView>, Error> {
        self.list_enrollment_views().await.map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
