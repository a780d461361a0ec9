//! Pre-write eligibility checks.
//!
//! The checker is a fast path: it rejects obviously ineligible requests
//! before a write is attempted. The writer re-validates inside the store
//! transaction, which is what actually holds under concurrency.

use std::sync::Arc;

use super::ports::EnrollmentRepository;
use super::{CourseId, StoreFailure, UserId};

/// Why a student may not be enrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The student is at the active-enrollment cap.
    ActiveEnrollmentLimitExceeded {
        /// Active enrollments counted.
        active: u32,
        /// Configured cap.
        limit: u32,
    },
    /// The student already has an enrollment for the course.
    AlreadyEnrolled,
}

/// Verdict of [`EligibilityChecker::check_eligibility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Nothing prevents the enrollment.
    Eligible,
    /// The enrollment must not be written.
    Rejected(Rejection),
}

/// Evaluates enrollment rules against the current store state.
pub struct EligibilityChecker<E> {
    enrollments: Arc<E>,
    limit: u32,
}

impl<E> Clone for EligibilityChecker<E> {
    fn clone(&self) -> Self {
        Self {
            enrollments: Arc::clone(&self.enrollments),
            limit: self.limit,
        }
    }
}

impl<E> EligibilityChecker<E>
where
    E: EnrollmentRepository,
{
    /// Build a checker enforcing `limit` active enrollments per student.
    pub fn new(enrollments: Arc<E>, limit: u32) -> Self {
        Self { enrollments, limit }
    }

    /// Active enrollment cap enforced by this checker.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Capacity rule alone: reject when the student is at the cap.
    pub async fn check_capacity(&self, student_id: UserId) -> Result<Eligibility, StoreFailure> {
        let active = self
            .enrollments
            .count_active_for_student(student_id)
            .await?;
        if active >= self.limit {
            return Ok(Eligibility::Rejected(
                Rejection::ActiveEnrollmentLimitExceeded {
                    active,
                    limit: self.limit,
                },
            ));
        }
        Ok(Eligibility::Eligible)
    }

    /// Duplicate rule alone: reject when the pair already exists in any
    /// status.
    pub async fn check_duplicate(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Eligibility, StoreFailure> {
        if self
            .enrollments
            .exists_for_pair(student_id, course_id)
            .await?
        {
            return Ok(Eligibility::Rejected(Rejection::AlreadyEnrolled));
        }
        Ok(Eligibility::Eligible)
    }

    /// Run capacity then duplicate checks, stopping at the first rejection.
    ///
    /// Both ids must already be resolved. [`super::EnrollmentService`] calls
    /// [`Self::check_capacity`] and [`Self::check_duplicate`] separately
    /// instead, because a capped student is reported before the course name
    /// is resolved.
    pub async fn check_eligibility(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Eligibility, StoreFailure> {
        match self.check_capacity(student_id).await? {
            Eligibility::Eligible => self.check_duplicate(student_id, course_id).await,
            rejected @ Eligibility::Rejected(_) => Ok(rejected),
        }
    }
}
