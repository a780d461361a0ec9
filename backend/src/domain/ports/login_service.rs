//! Driving port for login.
//!
//! Inbound adapters call this port to authenticate credentials without
//! importing persistence, so handler tests can substitute a double.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Error, LoginCredentials, User, UserDraft, UserId, UserType};

/// Message returned for any credential mismatch.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password.";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// In-memory authenticator accepting a single development account.
///
/// `admin@example.edu` / `password` authenticates as admin id 1.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.email() != "admin@example.edu" || credentials.password() != "password" {
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        }
        let account_created_on = NaiveDate::from_ymd_opt(2024, 1, 1)
            .ok_or_else(|| Error::internal("invalid fixture account date"))?;
        Ok(User::new(UserDraft {
            id: UserId::new(1),
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            email: credentials.email().to_owned(),
            user_type: UserType::Admin,
            account_created_on,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin@example.edu", "password", true)]
    #[case("admin@example.edu", "wrong", false)]
    #[case("other@example.edu", "password", false)]
    #[tokio::test]
    async fn fixture_login_accepts_only_the_development_account(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        let result = FixtureLoginService.authenticate(&creds).await;
        match (should_succeed, result) {
            (true, Ok(user)) => assert_eq!(user.id(), UserId::new(1)),
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), INVALID_LOGIN_MESSAGE);
            }
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(user)) => panic!("expected failure, got success: {}", user.id()),
        }
    }
}
