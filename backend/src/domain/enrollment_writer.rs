//! Atomic enrollment creation.

use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use super::ports::{EnrollmentRepository, EnrollmentRepositoryError, InsertOutcome};
use super::{CourseId, Enrollment, NewEnrollment, StoreFailure, UserId};

/// Failure of [`EnrollmentWriter::commit_enrollment`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteFailure {
    /// The store's uniqueness guard fired.
    #[error("enrollment pair already stored")]
    ConstraintViolation,
    /// The cap was reached between the check and the write.
    #[error("active enrollment limit reached ({active} active)")]
    LimitReached {
        /// Active enrollments observed inside the write.
        active: u32,
    },
    /// Any other store fault.
    #[error(transparent)]
    Store(#[from] StoreFailure),
}

/// Persists new enrollments dated by the injected clock.
pub struct EnrollmentWriter<E> {
    enrollments: Arc<E>,
    clock: Arc<dyn Clock>,
    limit: u32,
}

impl<E> Clone for EnrollmentWriter<E> {
    fn clone(&self) -> Self {
        Self {
            enrollments: Arc::clone(&self.enrollments),
            clock: Arc::clone(&self.clock),
            limit: self.limit,
        }
    }
}

impl<E> EnrollmentWriter<E>
where
    E: EnrollmentRepository,
{
    /// Build a writer that refuses inserts once `limit` active enrollments
    /// exist for the student.
    pub fn new(enrollments: Arc<E>, clock: Arc<dyn Clock>, limit: u32) -> Self {
        Self {
            enrollments,
            clock,
            limit,
        }
    }

    /// Store an active enrollment dated today (local time).
    pub async fn commit_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Enrollment, WriteFailure> {
        let draft = NewEnrollment {
            student_id,
            course_id,
            enrolled_on: self.clock.local().date_naive(),
        };

        match self.enrollments.insert_within_limit(&draft, self.limit).await {
            Ok(InsertOutcome::Inserted(enrollment)) => Ok(enrollment),
            Ok(InsertOutcome::LimitReached { active }) => {
                Err(WriteFailure::LimitReached { active })
            }
            Err(EnrollmentRepositoryError::Duplicate { message }) => {
                warn!(%student_id, %course_id, %message, "unique enrollment guard fired");
                Err(WriteFailure::ConstraintViolation)
            }
            Err(other) => Err(WriteFailure::Store(other.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockEnrollmentRepository;
    use crate::domain::{CompletionStatus, EnrollmentId};
    use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FixtureClock(DateTime<Local>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0.with_timezone(&Utc)
        }
    }

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date")
    }

    fn clock_on(date: NaiveDate) -> Arc<dyn Clock> {
        let noon = date.and_hms_opt(12, 0, 0).expect("valid time");
        let local = Local
            .from_local_datetime(&noon)
            .earliest()
            .expect("noon exists in every zone");
        Arc::new(FixtureClock(local))
    }

    fn writer(repo: MockEnrollmentRepository, date: NaiveDate) -> EnrollmentWriter<MockEnrollmentRepository> {
        EnrollmentWriter::new(Arc::new(repo), clock_on(date), 3)
    }

    #[rstest]
    #[tokio::test]
    async fn inserts_active_enrollment_dated_today(today: NaiveDate) {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert_within_limit()
            .withf(move |draft, limit| {
                draft.student_id == UserId::new(7)
                    && draft.course_id == CourseId::new(3)
                    && draft.enrolled_on == today
                    && *limit == 3
            })
            .times(1)
            .return_once(|draft, _| {
                Ok(InsertOutcome::Inserted(Enrollment {
                    id: EnrollmentId::new(12),
                    student_id: draft.student_id,
                    course_id: draft.course_id,
                    enrolled_on: draft.enrolled_on,
                    status: CompletionStatus::Active,
                }))
            });

        let stored = writer(repo, today)
            .commit_enrollment(UserId::new(7), CourseId::new(3))
            .await
            .expect("insert succeeds");

        assert_eq!(stored.id, EnrollmentId::new(12));
        assert_eq!(stored.enrolled_on, today);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_guard_maps_to_constraint_violation(today: NaiveDate) {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert_within_limit()
            .return_once(|_, _| Err(EnrollmentRepositoryError::duplicate("uq_enrollments_pair")));

        let err = writer(repo, today)
            .commit_enrollment(UserId::new(7), CourseId::new(3))
            .await
            .expect_err("duplicate");

        assert_eq!(err, WriteFailure::ConstraintViolation);
    }

    #[rstest]
    #[tokio::test]
    async fn cap_reached_inside_the_write_is_reported(today: NaiveDate) {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert_within_limit()
            .return_once(|_, _| Ok(InsertOutcome::LimitReached { active: 3 }));

        let err = writer(repo, today)
            .commit_enrollment(UserId::new(7), CourseId::new(3))
            .await
            .expect_err("cap reached");

        assert_eq!(err, WriteFailure::LimitReached { active: 3 });
    }

    #[rstest]
    #[tokio::test]
    async fn connection_loss_is_a_store_failure(today: NaiveDate) {
        let mut repo = MockEnrollmentRepository::new();
        repo.expect_insert_within_limit()
            .return_once(|_, _| Err(EnrollmentRepositoryError::connection("pool exhausted")));

        let err = writer(repo, today)
            .commit_enrollment(UserId::new(7), CourseId::new(3))
            .await
            .expect_err("store down");

        assert!(matches!(
            err,
            WriteFailure::Store(StoreFailure::Unavailable { .. })
        ));
    }
}
