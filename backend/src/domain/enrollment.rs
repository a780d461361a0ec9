//! Enrollment records and their presentation forms.
//!
//! An [`Enrollment`] links one student to one course. The stored status
//! keeps its legacy single-character encoding; [`CompletionStatus`] is the
//! typed form used everywhere inside the core.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CourseId, CourseName, FullName, UserId};

/// Maximum number of simultaneously active enrollments per student.
pub const ACTIVE_ENROLLMENT_LIMIT: u32 = 3;

/// Placeholder rendered when a listing row references a missing party.
pub const UNKNOWN_PARTY: &str = "Unknown";

/// Stable enrollment identifier assigned by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(i32);

impl EnrollmentId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw store identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a stored status code is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown completion status code: {code:?}")]
pub struct UnknownCompletionStatus {
    /// Offending code as read from the store.
    pub code: String,
}

/// Lifecycle state of an enrollment.
///
/// Only [`CompletionStatus::Active`] counts towards
/// [`ACTIVE_ENROLLMENT_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    /// Currently attending.
    #[default]
    Active,
    /// Finished the course.
    Completed,
    /// Left the course early.
    Withdrawn,
}

impl CompletionStatus {
    /// Store and wire encoding (`"0"`, `"1"`, `"2"`).
    ///
    /// # Examples
    /// ```
    /// use registrar::domain::CompletionStatus;
    ///
    /// assert_eq!(CompletionStatus::Active.code(), "0");
    /// assert_eq!("2".parse::<CompletionStatus>(), Ok(CompletionStatus::Withdrawn));
    /// ```
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Active => "0",
            Self::Completed => "1",
            Self::Withdrawn => "2",
        }
    }

    /// Whether the enrollment occupies one of the student's active slots.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for CompletionStatus {
    type Err = UnknownCompletionStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Active),
            "1" => Ok(Self::Completed),
            "2" => Ok(Self::Withdrawn),
            other => Err(UnknownCompletionStatus {
                code: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A persisted enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Store identifier.
    pub id: EnrollmentId,
    /// Enrolled student.
    pub student_id: UserId,
    /// Target course.
    pub course_id: CourseId,
    /// Calendar date of enrollment.
    pub enrolled_on: NaiveDate,
    /// Lifecycle state.
    pub status: CompletionStatus,
}

/// Enrollment awaiting insertion; the store assigns the id and the status
/// starts at [`CompletionStatus::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEnrollment {
    /// Student being enrolled.
    pub student_id: UserId,
    /// Course being joined.
    pub course_id: CourseId,
    /// Calendar date of enrollment.
    pub enrolled_on: NaiveDate,
}

/// Enrollment joined with the display names of its parties.
///
/// Either name is `None` when the referenced record no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentListing {
    /// The underlying enrollment.
    pub enrollment: Enrollment,
    /// `first + " " + last` of the student, when present.
    pub student_name: Option<String>,
    /// Course name, when present.
    pub course_name: Option<String>,
}

/// Flattened, display-ready enrollment.
///
/// Dates are rendered as month/day/year without zero padding and the status
/// as its numeric code, matching what existing clients parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentView {
    /// Student display name or [`UNKNOWN_PARTY`].
    pub student_name: String,
    /// Course name or [`UNKNOWN_PARTY`].
    pub course_name: String,
    /// Status code as text.
    pub completion_status: String,
    /// Short date, e.g. `9/1/2024`.
    pub enrollment_date: String,
}

impl From<EnrollmentListing> for EnrollmentView {
    fn from(value: EnrollmentListing) -> Self {
        let EnrollmentListing {
            enrollment,
            student_name,
            course_name,
        } = value;
        Self {
            student_name: student_name.unwrap_or_else(|| UNKNOWN_PARTY.to_owned()),
            course_name: course_name.unwrap_or_else(|| UNKNOWN_PARTY.to_owned()),
            completion_status: enrollment.status.code().to_owned(),
            enrollment_date: format_short_date(enrollment.enrolled_on),
        }
    }
}

/// Render a date as `M/D/YYYY` with no zero padding.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use registrar::domain::format_short_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date");
/// assert_eq!(format_short_date(date), "9/1/2024");
/// ```
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Validated enrollment command input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    /// Student to enroll, by full name.
    pub student_name: FullName,
    /// Course to join, by name.
    pub course_name: CourseName,
}

impl EnrollmentRequest {
    /// Build a request from optional raw parts.
    ///
    /// Returns `None` when either part is absent or empty.
    pub fn from_parts(student_name: Option<String>, course_name: Option<String>) -> Option<Self> {
        let student_name = FullName::new(student_name?).ok()?;
        let course_name = CourseName::new(course_name?).ok()?;
        Some(Self {
            student_name,
            course_name,
        })
    }
}

/// Outcome of a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentReceipt {
    /// The stored enrollment.
    pub enrollment: Enrollment,
    /// Student display name as supplied.
    pub student_name: FullName,
    /// Course name as supplied.
    pub course_name: CourseName,
}

impl EnrollmentReceipt {
    /// Confirmation message shown to the caller.
    #[must_use]
    pub fn confirmation(&self) -> String {
        format!(
            "Student '{}' has been enrolled in '{}'.",
            self.student_name, self.course_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn enrollment(status: CompletionStatus) -> Enrollment {
        Enrollment {
            id: EnrollmentId::new(41),
            student_id: UserId::new(7),
            course_id: CourseId::new(3),
            enrolled_on: date(2024, 9, 1),
            status,
        }
    }

    #[rstest]
    #[case(date(2024, 9, 1), "9/1/2024")]
    #[case(date(2024, 12, 25), "12/25/2024")]
    #[case(date(2025, 1, 9), "1/9/2025")]
    fn short_date_drops_zero_padding(#[case] input: NaiveDate, #[case] expected: &str) {
        assert_eq!(format_short_date(input), expected);
    }

    #[rstest]
    #[case("0", CompletionStatus::Active)]
    #[case("1", CompletionStatus::Completed)]
    #[case("2", CompletionStatus::Withdrawn)]
    fn status_codes_parse(#[case] code: &str, #[case] expected: CompletionStatus) {
        assert_eq!(code.parse::<CompletionStatus>(), Ok(expected));
        assert_eq!(expected.code(), code);
    }

    #[rstest]
    #[case("")]
    #[case("3")]
    #[case("A")]
    fn unknown_status_codes_are_rejected(#[case] code: &str) {
        let err = code.parse::<CompletionStatus>().expect_err("unknown code");
        assert_eq!(err.code, code);
    }

    #[rstest]
    fn only_active_counts_towards_the_limit() {
        assert!(CompletionStatus::Active.is_active());
        assert!(!CompletionStatus::Completed.is_active());
        assert!(!CompletionStatus::Withdrawn.is_active());
    }

    #[rstest]
    fn view_substitutes_unknown_for_missing_parties() {
        let listing = EnrollmentListing {
            enrollment: enrollment(CompletionStatus::Completed),
            student_name: None,
            course_name: Some("Algorithms 101".to_owned()),
        };

        let view = EnrollmentView::from(listing);

        assert_eq!(view.student_name, UNKNOWN_PARTY);
        assert_eq!(view.course_name, "Algorithms 101");
        assert_eq!(view.completion_status, "1");
        assert_eq!(view.enrollment_date, "9/1/2024");
    }

    #[rstest]
    #[case(None, Some("Algorithms 101"))]
    #[case(Some(""), Some("Algorithms 101"))]
    #[case(Some("Ada Lovelace"), None)]
    #[case(Some("Ada Lovelace"), Some(""))]
    fn request_requires_both_names(#[case] student: Option<&str>, #[case] course: Option<&str>) {
        let request =
            EnrollmentRequest::from_parts(student.map(str::to_owned), course.map(str::to_owned));
        assert!(request.is_none());
    }

    #[rstest]
    fn receipt_confirmation_quotes_both_names() {
        let receipt = EnrollmentReceipt {
            enrollment: enrollment(CompletionStatus::Active),
            student_name: FullName::new("Ada Lovelace").expect("valid"),
            course_name: CourseName::new("Algorithms 101").expect("valid"),
        };

        assert_eq!(
            receipt.confirmation(),
            "Student 'Ada Lovelace' has been enrolled in 'Algorithms 101'."
        );
    }
}
