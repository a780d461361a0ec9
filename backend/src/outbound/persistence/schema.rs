//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// User accounts, both staff and students.
    users (id) {
        /// Primary key assigned by the database sequence.
        id -> Int4,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Unique login email.
        email -> Varchar,
        /// Login secret compared verbatim.
        password -> Varchar,
        /// Account discriminator: 1 admin, 2 student.
        user_type -> Int2,
        /// Account creation date.
        account_created_on -> Date,
    }
}

diesel::table! {
    /// Course offerings.
    courses (id) {
        /// Primary key assigned by the database sequence.
        id -> Int4,
        /// Display and lookup name.
        course_name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Seat capacity.
        max_seats -> Int4,
        /// Occupied seats maintained by course management.
        current_seats -> Int4,
        /// First day of the course.
        start_date -> Date,
        /// Last day of the course.
        end_date -> Date,
    }
}

diesel::table! {
    /// Student-to-course links.
    ///
    /// A unique index on `(student_id, course_id)` guarantees at most one row
    /// per pair.
    enrollments (id) {
        /// Primary key assigned by the database sequence.
        id -> Int4,
        /// References `users.id`.
        student_id -> Int4,
        /// References `courses.id`.
        course_id -> Int4,
        /// Calendar date of enrollment.
        enrollment_date -> Date,
        /// Legacy status code: "0" active, "1" completed, "2" withdrawn.
        completion_status -> Varchar,
    }
}

diesel::joinable!(enrollments -> users (student_id));
diesel::joinable!(enrollments -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(users, courses, enrollments);
