//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`, [`LoginService`]) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_repository;
mod courses_query;
mod enrollment_command;
mod enrollment_query;
mod enrollment_repository;
mod login_service;
mod students_query;
mod user_repository;

#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError, FixtureCourseRepository};
#[cfg(test)]
pub use courses_query::MockCoursesQuery;
pub use courses_query::{CoursesQuery, FixtureCoursesQuery};
#[cfg(test)]
pub use enrollment_command::MockEnrollmentCommand;
pub use enrollment_command::{EnrollmentCommand, FixtureEnrollmentCommand};
#[cfg(test)]
pub use enrollment_query::MockEnrollmentQuery;
pub use enrollment_query::{EnrollmentQuery, FixtureEnrollmentQuery};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{
    EnrollmentRepository, EnrollmentRepositoryError, FixtureEnrollmentRepository, InsertOutcome,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, INVALID_LOGIN_MESSAGE, LoginService};
#[cfg(test)]
pub use students_query::MockStudentsQuery;
pub use students_query::{FixtureStudentsQuery, StudentsQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
