//! Driving port for enrollment listings.

use async_trait::async_trait;

use crate::domain::{EnrollmentView, Error};

/// Driving port for enrollment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// Every enrollment as a display-ready view, ordered by id.
    ///
    /// Returns a `not_found` error when no enrollment exists.
    async fn list_enrollments(&self) -> Result<Vec<EnrollmentView>, Error>;
}

/// Fixture query backed by an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentQuery;

#[async_trait]
impl EnrollmentQuery for FixtureEnrollmentQuery {
    async fn list_enrollments(&self) -> Result<Vec<EnrollmentView>, Error> {
        Err(Error::not_found("No enrollments found."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_reports_no_enrollments() {
        let err = FixtureEnrollmentQuery
            .list_enrollments()
            .await
            .expect_err("empty store");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
