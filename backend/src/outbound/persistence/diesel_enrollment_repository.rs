//! PostgreSQL-backed `EnrollmentRepository` implementation.
//!
//! The guarded insert runs in one transaction:
//! - lock the student's `users` row with `FOR UPDATE`,
//! - count the student's active enrollments,
//! - insert unless the cap is reached.
//!
//! Concurrent enrollments for the same student serialise on the row lock. The
//! unique index on `(student_id, course_id)` rejects a second row for a pair
//! and surfaces as [`EnrollmentRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, warn};

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError, InsertOutcome};
use crate::domain::{CompletionStatus, CourseId, EnrollmentListing, NewEnrollment, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{EnrollmentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, enrollments, users};

/// Diesel-backed implementation of the enrollment repository port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

enum GuardedInsert {
    Inserted(EnrollmentRow),
    LimitReached(i64),
}

fn map_pool_error(error: PoolError) -> EnrollmentRepositoryError {
    map_basic_pool_error(error, EnrollmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentRepositoryError {
    if is_unique_violation(&error) {
        debug!("enrollment unique index rejected insert");
        return EnrollmentRepositoryError::duplicate("student already enrolled in course");
    }
    map_basic_diesel_error(
        error,
        EnrollmentRepositoryError::query,
        EnrollmentRepositoryError::connection,
    )
}

fn decode(row: EnrollmentRow) -> Result<crate::domain::Enrollment, EnrollmentRepositoryError> {
    let id = row.id;
    row.into_domain().map_err(|message| {
        warn!(enrollment_id = id, %message, "stored enrollment row could not be decoded");
        EnrollmentRepositoryError::query(message)
    })
}

fn to_count(raw: i64) -> Result<u32, EnrollmentRepositoryError> {
    u32::try_from(raw).map_err(|_| EnrollmentRepositoryError::query("active count out of range"))
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn count_active_for_student(
        &self,
        student_id: UserId,
    ) -> Result<u32, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let active = enrollments::table
            .filter(enrollments::student_id.eq(student_id.get()))
            .filter(enrollments::completion_status.eq(CompletionStatus::Active.code()))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        to_count(active)
    }

    async fn exists_for_pair(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            enrollments::table
                .filter(enrollments::student_id.eq(student_id.get()))
                .filter(enrollments::course_id.eq(course_id.get())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert_within_limit(
        &self,
        draft: &NewEnrollment,
        limit: u32,
    ) -> Result<InsertOutcome, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let student_id = draft.student_id.get();
        let new_row = NewEnrollmentRow {
            student_id,
            course_id: draft.course_id.get(),
            enrollment_date: draft.enrolled_on,
            completion_status: CompletionStatus::Active.code(),
        };
        let limit = i64::from(limit);

        let outcome = conn
            .transaction(|conn| {
                async move {
                    users::table
                        .find(student_id)
                        .select(users::id)
                        .for_update()
                        .first::<i32>(conn)
                        .await?;

                    let active = enrollments::table
                        .filter(enrollments::student_id.eq(student_id))
                        .filter(
                            enrollments::completion_status.eq(CompletionStatus::Active.code()),
                        )
                        .count()
                        .get_result::<i64>(conn)
                        .await?;

                    if active >= limit {
                        return Ok(GuardedInsert::LimitReached(active));
                    }

                    let row = diesel::insert_into(enrollments::table)
                        .values(&new_row)
                        .returning(EnrollmentRow::as_returning())
                        .get_result::<EnrollmentRow>(conn)
                        .await?;

                    Ok(GuardedInsert::Inserted(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            GuardedInsert::Inserted(row) => decode(row).map(InsertOutcome::Inserted),
            GuardedInsert::LimitReached(active) => Ok(InsertOutcome::LimitReached {
                active: to_count(active)?,
            }),
        }
    }

    async fn list_with_parties(&self) -> Result<Vec<EnrollmentListing>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = enrollments::table
            .left_join(users::table)
            .left_join(courses::table)
            .order(enrollments::id.asc())
            .select((
                EnrollmentRow::as_select(),
                users::first_name.nullable(),
                users::last_name.nullable(),
                courses::course_name.nullable(),
            ))
            .load::<(EnrollmentRow, Option<String>, Option<String>, Option<String>)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(row, first_name, last_name, course_name)| {
                let student_name = first_name
                    .zip(last_name)
                    .map(|(first, last)| format!("{first} {last}"));
                Ok(EnrollmentListing {
                    enrollment: decode(row)?,
                    student_name,
                    course_name,
                })
            })
            .collect()
    }
}
