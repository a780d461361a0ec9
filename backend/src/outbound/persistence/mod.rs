//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven repository ports backed by
//! PostgreSQL via `diesel-async` and a `bb8` pool.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every Diesel and pool error is mapped into the port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use registrar::outbound::persistence::{DbPool, DieselEnrollmentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registrar")).await?;
//! let enrollments = DieselEnrollmentRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
