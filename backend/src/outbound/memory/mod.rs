//! In-process record store.
//!
//! [`InMemoryRecordStore`] implements every driven repository port over a
//! single mutex-guarded set of maps. The server uses it when no database URL
//! is configured and the integration tests use it to drive the full HTTP app.
//! The guarded insert holds the lock across the count and the insert, so it
//! gives the same per-student atomicity as the PostgreSQL adapter.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, EnrollmentRepository, EnrollmentRepositoryError,
    InsertOutcome, UserPersistenceError, UserRepository,
};
use crate::domain::{
    CompletionStatus, Course, CourseId, CourseName, Enrollment, EnrollmentId, EnrollmentListing,
    FullName, LoginCredentials, NewEnrollment, User, UserId,
};

struct StoredUser {
    user: User,
    password: String,
}

#[derive(Default)]
struct Records {
    users: BTreeMap<UserId, StoredUser>,
    courses: BTreeMap<CourseId, Course>,
    enrollments: BTreeMap<EnrollmentId, Enrollment>,
    last_enrollment_id: i32,
}

impl Records {
    fn active_count(&self, student_id: UserId) -> u32 {
        let active = self
            .enrollments
            .values()
            .filter(|e| e.student_id == student_id && e.status.is_active())
            .count();
        u32::try_from(active).unwrap_or(u32::MAX)
    }

    fn pair_exists(&self, student_id: UserId, course_id: CourseId) -> bool {
        self.enrollments
            .values()
            .any(|e| e.student_id == student_id && e.course_id == course_id)
    }
}

/// Mutex-guarded store implementing the user, course and enrollment ports.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use registrar::domain::{User, UserDraft, UserId, UserType};
/// use registrar::outbound::memory::InMemoryRecordStore;
///
/// let store = InMemoryRecordStore::new().with_user(
///     User::new(UserDraft {
///         id: UserId::new(7),
///         first_name: "Ada".into(),
///         last_name: "Lovelace".into(),
///         email: "ada@example.edu".into(),
///         user_type: UserType::Student,
///         account_created_on: NaiveDate::from_ymd_opt(2024, 9, 1).expect("date"),
///     }),
///     "secret",
/// );
/// assert!(store.enrollments().is_empty());
/// ```
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Records>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn records_mut(&mut self) -> &mut Records {
        self.records.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add or replace a user account.
    pub fn with_user(mut self, user: User, password: impl Into<String>) -> Self {
        let password = password.into();
        self.records_mut()
            .users
            .insert(user.id(), StoredUser { user, password });
        self
    }

    /// Add or replace a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.records_mut().courses.insert(course.id, course);
        self
    }

    /// Add an existing enrollment; later inserts receive higher ids.
    pub fn with_enrollment(mut self, enrollment: Enrollment) -> Self {
        let records = self.records_mut();
        records.last_enrollment_id = records.last_enrollment_id.max(enrollment.id.get());
        records.enrollments.insert(enrollment.id, enrollment);
        self
    }

    /// Snapshot of every stored enrollment ordered by id.
    pub fn enrollments(&self) -> Vec<Enrollment> {
        self.lock().enrollments.values().cloned().collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryRecordStore {
    async fn find_user_by_full_name(
        &self,
        full_name: &FullName,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .map(|stored| &stored.user)
            .find(|user| user.display_name() == full_name.as_ref())
            .cloned())
    }

    async fn find_student_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .get(&id)
            .map(|stored| &stored.user)
            .filter(|user| user.is_student())
            .cloned())
    }

    async fn list_students(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .map(|stored| &stored.user)
            .filter(|user| user.is_student())
            .cloned()
            .collect())
    }

    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|stored| {
                stored.user.email() == credentials.email()
                    && stored.password == credentials.password()
            })
            .map(|stored| stored.user.clone()))
    }
}

#[async_trait]
impl CourseRepository for InMemoryRecordStore {
    async fn find_by_name(
        &self,
        name: &CourseName,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self
            .lock()
            .courses
            .values()
            .find(|course| course.name == name.as_ref())
            .cloned())
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.lock().courses.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(self.lock().courses.values().cloned().collect())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryRecordStore {
    async fn count_active_for_student(
        &self,
        student_id: UserId,
    ) -> Result<u32, EnrollmentRepositoryError> {
        Ok(self.lock().active_count(student_id))
    }

    async fn exists_for_pair(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, EnrollmentRepositoryError> {
        Ok(self.lock().pair_exists(student_id, course_id))
    }

    async fn insert_within_limit(
        &self,
        draft: &NewEnrollment,
        limit: u32,
    ) -> Result<InsertOutcome, EnrollmentRepositoryError> {
        let mut records = self.lock();

        if records.pair_exists(draft.student_id, draft.course_id) {
            return Err(EnrollmentRepositoryError::duplicate(format!(
                "student {} already enrolled in course {}",
                draft.student_id, draft.course_id
            )));
        }
        let active = records.active_count(draft.student_id);
        if active >= limit {
            return Ok(InsertOutcome::LimitReached { active });
        }

        let next = records
            .last_enrollment_id
            .checked_add(1)
            .ok_or_else(|| EnrollmentRepositoryError::query("enrollment id space exhausted"))?;
        let enrollment = Enrollment {
            id: EnrollmentId::new(next),
            student_id: draft.student_id,
            course_id: draft.course_id,
            enrolled_on: draft.enrolled_on,
            status: CompletionStatus::Active,
        };
        records.last_enrollment_id = next;
        records.enrollments.insert(enrollment.id, enrollment.clone());
        Ok(InsertOutcome::Inserted(enrollment))
    }

    async fn list_with_parties(&self) -> Result<Vec<EnrollmentListing>, EnrollmentRepositoryError> {
        let records = self.lock();
        Ok(records
            .enrollments
            .values()
            .map(|enrollment| EnrollmentListing {
                enrollment: enrollment.clone(),
                student_name: records
                    .users
                    .get(&enrollment.student_id)
                    .map(|stored| stored.user.display_name()),
                course_name: records
                    .courses
                    .get(&enrollment.course_id)
                    .map(|course| course.name.clone()),
            })
            .collect())
    }
}
