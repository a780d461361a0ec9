//! Course catalogue and student directory reads.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, CoursesQuery, StudentsQuery, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Course, CourseId, Error, User, UserId};

fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Read-only service behind the `/courses` and `/students` endpoints.
pub struct RosterService<U, C> {
    users: Arc<U>,
    courses: Arc<C>,
}

impl<U, C> Clone for RosterService<U, C> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            courses: Arc::clone(&self.courses),
        }
    }
}

impl<U, C> RosterService<U, C> {
    /// Create the service over user and course repositories.
    pub fn new(users: Arc<U>, courses: Arc<C>) -> Self {
        Self { users, courses }
    }
}

#[async_trait]
impl<U, C> CoursesQuery for RosterService<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        let courses = self.courses.list().await.map_err(map_course_error)?;
        if courses.is_empty() {
            return Err(Error::not_found("No courses found."));
        }
        Ok(courses)
    }

    async fn get_course(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(format!("Course with ID {id} not found.")))
    }
}

#[async_trait]
impl<U, C> StudentsQuery for RosterService<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    async fn list_students(&self) -> Result<Vec<User>, Error> {
        let students = self.users.list_students().await.map_err(map_user_error)?;
        if students.is_empty() {
            return Err(Error::not_found("No students found."));
        }
        Ok(students)
    }

    async fn get_student(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_student_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("Student with ID {id} not found.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        FixtureCourseRepository, FixtureUserRepository, MockCourseRepository, MockUserRepository,
    };
    use chrono::NaiveDate;
    use rstest::rstest;

    fn course(id: i32) -> Course {
        Course {
            id: CourseId::new(id),
            name: format!("Course {id}"),
            description: String::new(),
            max_seats: 20,
            current_seats: 0,
            start_date: NaiveDate::from_ymd_opt(2024, 9, 2).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 20).expect("valid date"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn empty_catalogue_is_not_found() {
        let service = RosterService::new(
            Arc::new(FixtureUserRepository),
            Arc::new(FixtureCourseRepository),
        );

        let err = service.list_courses().await.expect_err("empty");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "No courses found.");
    }

    #[rstest]
    #[tokio::test]
    async fn course_lookup_returns_the_stored_course() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .withf(|id| *id == CourseId::new(3))
            .return_once(|id| Ok(Some(course(id.get()))));
        let service = RosterService::new(Arc::new(FixtureUserRepository), Arc::new(courses));

        let found = service.get_course(CourseId::new(3)).await.expect("found");

        assert_eq!(found.name, "Course 3");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_course_names_the_id() {
        let service = RosterService::new(
            Arc::new(FixtureUserRepository),
            Arc::new(FixtureCourseRepository),
        );

        let err = service.get_course(CourseId::new(99)).await.expect_err("missing");

        assert_eq!(err.message(), "Course with ID 99 not found.");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_student_names_the_id() {
        let service = RosterService::new(
            Arc::new(FixtureUserRepository),
            Arc::new(FixtureCourseRepository),
        );

        let err = service.get_student(UserId::new(4)).await.expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Student with ID 4 not found.");
    }

    #[rstest]
    #[tokio::test]
    async fn user_store_outage_is_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_list_students()
            .return_once(|| Err(UserPersistenceError::connection("refused")));
        let service = RosterService::new(Arc::new(users), Arc::new(FixtureCourseRepository));

        let err = service.list_students().await.expect_err("store down");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
