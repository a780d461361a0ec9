//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live here so
//! every repository decodes rows the same way.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{
    CompletionStatus, Course, CourseId, Enrollment, EnrollmentId, User, UserDraft, UserId,
    UserType,
};

use super::schema::{courses, enrollments, users};

/// Row struct for reading from the users table.
///
/// The password column is never selected.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_type: i16,
    pub account_created_on: NaiveDate,
}

impl UserRow {
    /// Decode into a domain user; fails on an unknown user type code.
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let user_type = UserType::try_from(self.user_type).map_err(|err| err.to_string())?;
        Ok(User::new(UserDraft {
            id: UserId::new(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            user_type,
            account_created_on: self.account_created_on,
        }))
    }
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i32,
    pub course_name: String,
    pub description: String,
    pub max_seats: i32,
    pub current_seats: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: CourseId::new(row.id),
            name: row.course_name,
            description: row.description,
            max_seats: row.max_seats,
            current_seats: row.current_seats,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub enrollment_date: NaiveDate,
    pub completion_status: String,
}

impl EnrollmentRow {
    /// Decode into a domain enrollment; fails on an unknown status code.
    pub(crate) fn into_domain(self) -> Result<Enrollment, String> {
        let status = self
            .completion_status
            .parse::<CompletionStatus>()
            .map_err(|err| err.to_string())?;
        Ok(Enrollment {
            id: EnrollmentId::new(self.id),
            student_id: UserId::new(self.student_id),
            course_id: CourseId::new(self.course_id),
            enrolled_on: self.enrollment_date,
            status,
        })
    }
}

/// Insertable struct for creating enrollment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow<'a> {
    pub student_id: i32,
    pub course_id: i32,
    pub enrollment_date: NaiveDate,
    pub completion_status: &'a str,
}
