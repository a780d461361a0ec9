//! Domain primitives, services and ports.
//!
//! Purpose: hold the enrollment rules independent of HTTP and storage.
//! Inbound adapters call the driving ports in [`ports`]; outbound adapters
//! implement the driven repository ports.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic error payload.
//! - [`User`], [`Course`], [`Enrollment`]: store records.
//! - [`EnrollmentService`], [`RosterService`], [`AccountService`]: port
//!   implementations.
//! - [`TraceId`]: request correlation identifier.

pub mod account_service;
pub mod auth;
pub mod course;
pub mod eligibility;
pub mod enrollment;
pub mod enrollment_error;
pub mod enrollment_service;
pub mod enrollment_writer;
pub mod error;
pub mod identity_resolver;
pub mod ports;
pub mod roster_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::course::{Course, CourseId, CourseName, CourseValidationError};
pub use self::eligibility::{Eligibility, EligibilityChecker, Rejection};
pub use self::enrollment::{
    ACTIVE_ENROLLMENT_LIMIT, CompletionStatus, Enrollment, EnrollmentId, EnrollmentListing,
    EnrollmentReceipt, EnrollmentRequest, EnrollmentView, NewEnrollment, UNKNOWN_PARTY,
    UnknownCompletionStatus, format_short_date,
};
pub use self::enrollment_error::{EnrollmentError, StoreFailure};
pub use self::enrollment_service::EnrollmentService;
pub use self::enrollment_writer::{EnrollmentWriter, WriteFailure};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity_resolver::IdentityResolver;
pub use self::roster_service::RosterService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{FullName, User, UserDraft, UserId, UserType, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use registrar::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("login required"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
