//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{
    FixtureCoursesQuery, FixtureEnrollmentCommand, FixtureEnrollmentQuery, FixtureLoginService,
    FixtureStudentsQuery,
};

use super::state::HttpStatePorts;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports bundle backed entirely by fixtures; override fields per test.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        enrollments: Arc::new(FixtureEnrollmentCommand),
        enrollments_query: Arc::new(FixtureEnrollmentQuery),
        courses: Arc::new(FixtureCoursesQuery),
        students: Arc::new(FixtureStudentsQuery),
        login: Arc::new(FixtureLoginService),
    }
}
