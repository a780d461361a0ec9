//! User records as seen by the registrar core.
//!
//! Users are provisioned elsewhere; the core only reads them. Students are
//! the subset of users carrying [`UserType::Student`] and are addressed by
//! their [`FullName`] when enrolling.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validation errors raised by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Full name was missing or empty.
    #[error("full name must not be empty")]
    EmptyFullName,
    /// The stored user type code is not recognised.
    #[error("unknown user type code: {code}")]
    UnknownUserType {
        /// Raw code read from the store.
        code: i16,
    },
}

/// Stable user identifier assigned by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
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

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account discriminator.
///
/// The record store keeps the legacy numeric encoding (`1` admin, `2`
/// student); translate with [`UserType::code`] and `TryFrom<i16>` at the
/// store boundary only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// Staff account.
    Admin,
    /// Student account; eligible for enrollment.
    Student,
}

impl UserType {
    /// Legacy store encoding.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Admin => 1,
            Self::Student => 2,
        }
    }
}

impl TryFrom<i16> for UserType {
    type Error = UserValidationError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Admin),
            2 => Ok(Self::Student),
            other => Err(UserValidationError::UnknownUserType { code: other }),
        }
    }
}

/// Display name formed as `first + " " + last`, used as a lookup key.
///
/// ## Invariants
/// - Must not be empty. Whitespace-only names are accepted and simply
///   fail to resolve.
/// - Stored verbatim: matching is exact and case-sensitive, so callers
///   must not expect trimming or case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and wrap a full name.
    ///
    /// # Examples
    /// ```
    /// use registrar::domain::FullName;
    ///
    /// let name = FullName::new("Ada Lovelace").expect("valid name");
    /// assert_eq!(name.as_ref(), "Ada Lovelace");
    /// assert!(FullName::new("").is_err());
    /// assert!(FullName::new("   ").is_ok());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    user_type: UserType,
    account_created_on: NaiveDate,
}

/// Field bundle used to build a [`User`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Store identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique login email.
    pub email: String,
    /// Account discriminator.
    pub user_type: UserType,
    /// Account creation date (not a course enrollment date).
    pub account_created_on: NaiveDate,
}

impl User {
    /// Build a user from its parts.
    #[must_use]
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            first_name,
            last_name,
            email,
            user_type,
            account_created_on,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
            user_type,
            account_created_on,
        }
    }

    /// Store identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Login email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Account discriminator.
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Whether this account may be enrolled in courses.
    pub fn is_student(&self) -> bool {
        self.user_type == UserType::Student
    }

    /// Account creation date.
    pub fn account_created_on(&self) -> NaiveDate {
        self.account_created_on
    }

    /// `first + " " + last`, unvalidated.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
