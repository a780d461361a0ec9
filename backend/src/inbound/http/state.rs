//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CoursesQuery, EnrollmentCommand, EnrollmentQuery, LoginService, StudentsQuery,
};

/// Parameter object bundling every port implementation the handlers use.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub enrollments: Arc<dyn EnrollmentCommand>,
    pub enrollments_query: Arc<dyn EnrollmentQuery>,
    pub courses: Arc<dyn CoursesQuery>,
    pub students: Arc<dyn StudentsQuery>,
    pub login: Arc<dyn LoginService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub enrollments: Arc<dyn EnrollmentCommand>,
    pub enrollments_query: Arc<dyn EnrollmentQuery>,
    pub courses: Arc<dyn CoursesQuery>,
    pub students: Arc<dyn StudentsQuery>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use registrar::domain::ports::{
    ///     FixtureCoursesQuery, FixtureEnrollmentCommand, FixtureEnrollmentQuery,
    ///     FixtureLoginService, FixtureStudentsQuery,
    /// };
    /// use registrar::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     enrollments: Arc::new(FixtureEnrollmentCommand),
    ///     enrollments_query: Arc::new(FixtureEnrollmentQuery),
    ///     courses: Arc::new(FixtureCoursesQuery),
    ///     students: Arc::new(FixtureStudentsQuery),
    ///     login: Arc::new(FixtureLoginService),
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            enrollments,
            enrollments_query,
            courses,
            students,
            login,
        } = ports;
        Self {
            enrollments,
            enrollments_query,
            courses,
            students,
            login,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
