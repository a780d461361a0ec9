//! Port abstraction for user lookups and their errors.
use async_trait::async_trait;

use crate::domain::{FullName, LoginCredentials, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Read-only access to user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the user whose `first + " " + last` equals `full_name` exactly.
    ///
    /// Every account type is searched. When several users share the name,
    /// the one with the lowest id is returned.
    async fn find_user_by_full_name(
        &self,
        full_name: &FullName,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a student by identifier.
    async fn find_student_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// List every student ordered by id.
    async fn list_students(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Find the account matching both email and password.
    async fn find_by_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, UserPersistenceError>;
}

/// Fixture implementation for tests that do not exercise user lookups.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_user_by_full_name(
        &self,
        _full_name: &FullName,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn find_student_by_id(&self, _id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn list_students(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(Vec::new())
    }

    async fn find_by_credentials(
        &self,
        _credentials: &LoginCredentials,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_resolves_nobody() {
        let repo = FixtureUserRepository;
        let name = FullName::new("Ada Lovelace").expect("valid name");

        let found = repo
            .find_user_by_full_name(&name)
            .await
            .expect("fixture lookup succeeds");

        assert!(found.is_none());
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = UserPersistenceError::connection("refused");
        assert_eq!(err.to_string(), "user repository connection failed: refused");
    }
}
