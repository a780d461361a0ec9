//! Credential checks backing the login endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    INVALID_LOGIN_MESSAGE, LoginService, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, User};

/// Login service backed by the user repository.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create the service.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let found = self
            .users
            .find_by_credentials(credentials)
            .await
            .map_err(|err| match err {
                UserPersistenceError::Connection { message } => {
                    Error::service_unavailable(format!("user repository unavailable: {message}"))
                }
                UserPersistenceError::Query { message } => {
                    Error::internal(format!("user repository error: {message}"))
                }
            })?;
        found.ok_or_else(|| {
            debug!("login rejected");
            Error::unauthorized(INVALID_LOGIN_MESSAGE)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureUserRepository, MockUserRepository};
    use crate::domain::{ErrorCode, UserDraft, UserId, UserType};
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn matching_credentials_return_the_account() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_credentials()
            .withf(|creds| creds.email() == "ada@example.edu" && creds.password() == "pw")
            .return_once(|creds| {
                Ok(Some(User::new(UserDraft {
                    id: UserId::new(7),
                    first_name: "Ada".to_owned(),
                    last_name: "Lovelace".to_owned(),
                    email: creds.email().to_owned(),
                    user_type: UserType::Student,
                    account_created_on: NaiveDate::from_ymd_opt(2023, 9, 1)
                        .expect("valid date"),
                })))
            });
        let service = AccountService::new(Arc::new(users));
        let creds = LoginCredentials::try_from_parts("ada@example.edu", "pw").expect("valid");

        let user = service.authenticate(&creds).await.expect("authenticated");

        assert_eq!(user.id(), UserId::new(7));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_credentials_are_unauthorised() {
        let service = AccountService::new(Arc::new(FixtureUserRepository));
        let creds = LoginCredentials::try_from_parts("ada@example.edu", "pw").expect("valid");

        let err = service.authenticate(&creds).await.expect_err("no match");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
    }
}
