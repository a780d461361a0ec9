//! Typed failures of the enrollment core.
//!
//! Every rejection carries the names the caller supplied so messages can be
//! shown verbatim. [`EnrollmentError`] converts into the transport-agnostic
//! [`Error`] at the driving-port boundary.

use serde_json::json;

use super::Error;
use super::ports::{CourseRepositoryError, EnrollmentRepositoryError, UserPersistenceError};

/// Record store failure surfaced through the enrollment core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreFailure {
    /// The store could not be reached.
    #[error("record store unavailable: {message}")]
    Unavailable {
        /// Adapter-provided detail.
        message: String,
    },
    /// A query failed or returned data the core cannot interpret.
    #[error("record store failure: {message}")]
    Failed {
        /// Adapter-provided detail.
        message: String,
    },
}

impl From<UserPersistenceError> for StoreFailure {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::Connection { message } => Self::Unavailable { message },
            UserPersistenceError::Query { message } => Self::Failed { message },
        }
    }
}

impl From<CourseRepositoryError> for StoreFailure {
    fn from(value: CourseRepositoryError) -> Self {
        match value {
            CourseRepositoryError::Connection { message } => Self::Unavailable { message },
            CourseRepositoryError::Query { message } => Self::Failed { message },
        }
    }
}

/// Enrollment core failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentError {
    /// Student or course name missing from the request.
    #[error(
        "Invalid enrollment request. Please provide both student name and course name."
    )]
    InvalidRequest,
    /// No student carries the supplied full name.
    #[error("Student '{name}' not found.")]
    StudentNotFound {
        /// Name as supplied.
        name: String,
    },
    /// No course carries the supplied name.
    #[error("Course '{name}' not found.")]
    CourseNotFound {
        /// Name as supplied.
        name: String,
    },
    /// The listing found nothing to show.
    #[error("No enrollments found.")]
    NoEnrollments,
    /// The student already holds the maximum number of active enrollments.
    #[error(
        "Student '{student}' is already enrolled in {limit} active classes. You cannot enroll in more classes until one is completed."
    )]
    ActiveEnrollmentLimitExceeded {
        /// Student name as supplied.
        student: String,
        /// Active enrollment cap.
        limit: u32,
    },
    /// The pair was found before writing.
    #[error("Student '{student}' is already enrolled in '{course}'.")]
    AlreadyEnrolled {
        /// Student name as supplied.
        student: String,
        /// Course name as supplied.
        course: String,
    },
    /// The store's uniqueness guard rejected the insert.
    #[error("Student '{student}' is already enrolled in '{course}'.")]
    ConstraintViolation {
        /// Student name as supplied.
        student: String,
        /// Course name as supplied.
        course: String,
    },
    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreFailure),
}

impl EnrollmentError {
    /// Short machine-friendly reason used in logs and error details.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::StudentNotFound { .. } => "student_not_found",
            Self::CourseNotFound { .. } => "course_not_found",
            Self::NoEnrollments => "no_enrollments",
            Self::ActiveEnrollmentLimitExceeded { .. } => "active_enrollment_limit_exceeded",
            Self::AlreadyEnrolled { .. } => "already_enrolled",
            Self::ConstraintViolation { .. } => "constraint_violation",
            Self::Store(_) => "store_failure",
        }
    }
}

impl From<UserPersistenceError> for EnrollmentError {
    fn from(value: UserPersistenceError) -> Self {
        Self::Store(value.into())
    }
}

impl From<CourseRepositoryError> for EnrollmentError {
    fn from(value: CourseRepositoryError) -> Self {
        Self::Store(value.into())
    }
}

impl From<EnrollmentRepositoryError> for StoreFailure {
    fn from(value: EnrollmentRepositoryError) -> Self {
        match value {
            EnrollmentRepositoryError::Connection { message } => Self::Unavailable { message },
            EnrollmentRepositoryError::Query { message }
            | EnrollmentRepositoryError::Duplicate { message } => Self::Failed { message },
        }
    }
}

impl From<EnrollmentError> for Error {
    fn from(value: EnrollmentError) -> Self {
        let message = value.to_string();
        let reason = value.reason();
        match value {
            EnrollmentError::InvalidRequest => Self::invalid_request(message).with_details(json!({
                "code": reason,
                "fields": ["studentName", "courseName"],
            })),
            EnrollmentError::StudentNotFound { name } => Self::not_found(message)
                .with_details(json!({ "code": reason, "studentName": name })),
            EnrollmentError::CourseNotFound { name } => Self::not_found(message)
                .with_details(json!({ "code": reason, "courseName": name })),
            EnrollmentError::NoEnrollments => Self::not_found(message),
            EnrollmentError::ActiveEnrollmentLimitExceeded { limit, .. } => {
                Self::business_rule_violation(message)
                    .with_details(json!({ "code": reason, "limit": limit }))
            }
            EnrollmentError::AlreadyEnrolled { .. } | EnrollmentError::ConstraintViolation { .. } => {
                Self::conflict(message).with_details(json!({ "code": reason }))
            }
            EnrollmentError::Store(StoreFailure::Unavailable { .. }) => {
                Self::service_unavailable(message)
            }
            EnrollmentError::Store(StoreFailure::Failed { .. }) => Self::internal(message),
        }
    }
}
