//! Course records.
//!
//! Courses are managed outside the registrar core. Enrollment reads them by
//! name; the catalogue endpoints read them by id or in bulk.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validation errors raised by course value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    /// Course name was missing or empty.
    #[error("course name must not be empty")]
    EmptyName,
}

/// Stable course identifier assigned by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(i32);

impl CourseId {
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

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Course name used as the human lookup key.
///
/// Matching against stored names is exact; the value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseName(String);

impl CourseName {
    /// Validate and wrap a course name.
    ///
    /// # Examples
    /// ```
    /// use registrar::domain::CourseName;
    ///
    /// let name = CourseName::new("Algorithms 101").expect("valid name");
    /// assert_eq!(name.as_ref(), "Algorithms 101");
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, CourseValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for CourseName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CourseName> for String {
    fn from(value: CourseName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseName {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A course offering.
///
/// `current_seats` is a denormalised occupancy counter maintained by course
/// management; enrollment neither reads nor updates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Store identifier.
    pub id: CourseId,
    /// Display and lookup name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Seat capacity.
    pub max_seats: i32,
    /// Occupied seats as recorded by course management.
    pub current_seats: i32,
    /// First day of the course.
    pub start_date: NaiveDate,
    /// Last day of the course.
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn course_name_rejects_empty_input() {
        assert_eq!(CourseName::new(""), Err(CourseValidationError::EmptyName));
    }

    #[rstest]
    fn course_name_keeps_whitespace_only_input() {
        let name = CourseName::new("\t ").expect("non-empty");
        assert_eq!(name.as_ref(), "\t ");
    }

    #[rstest]
    fn course_name_deserialises_through_validation() {
        let parsed: Result<CourseName, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: CourseName = serde_json::from_str("\"Databases\"").expect("valid");
        assert_eq!(parsed.as_ref(), "Databases");
    }
}
