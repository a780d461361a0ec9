//! Name-to-identifier resolution for students and courses.

use std::sync::Arc;

use tracing::debug;

use super::ports::{CourseRepository, UserRepository};
use super::{CourseId, CourseName, EnrollmentError, FullName, UserId};

/// Translates human names into store identifiers.
///
/// Matching is exact and spans every account type. When several users share
/// a full name the one with the lowest id wins; the repository contract
/// guarantees that ordering.
pub struct IdentityResolver<U, C> {
    users: Arc<U>,
    courses: Arc<C>,
}

impl<U, C> Clone for IdentityResolver<U, C> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            courses: Arc::clone(&self.courses),
        }
    }
}

impl<U, C> IdentityResolver<U, C>
where
    U: UserRepository,
    C: CourseRepository,
{
    /// Build a resolver over the user and course repositories.
    pub fn new(users: Arc<U>, courses: Arc<C>) -> Self {
        Self { users, courses }
    }

    /// Resolve a student's full name to their id.
    pub async fn resolve_student(&self, full_name: &FullName) -> Result<UserId, EnrollmentError> {
        let student = self.users.find_user_by_full_name(full_name).await?;
        match student {
            Some(user) => Ok(user.id()),
            None => {
                debug!(student = %full_name, "student name did not resolve");
                Err(EnrollmentError::StudentNotFound {
                    name: full_name.to_string(),
                })
            }
        }
    }

    /// Resolve a course name to its id.
    pub async fn resolve_course(&self, name: &CourseName) -> Result<CourseId, EnrollmentError> {
        match self.courses.find_by_name(name).await? {
            Some(course) => Ok(course.id),
            None => {
                debug!(course = %name, "course name did not resolve");
                Err(EnrollmentError::CourseNotFound {
                    name: name.to_string(),
                })
            }
        }
    }
}
