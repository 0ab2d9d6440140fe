//! User data model.
//!
//! Usernames and email addresses are unique across the directory. Both are
//! trimmed on construction so lookups and uniqueness checks see the same text
//! the caller meant.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum username length accepted by the store.
pub const USERNAME_MAX: usize = 50;
/// Maximum email length accepted by the store.
pub const EMAIL_MAX: usize = 100;

/// Validation errors returned by the user newtypes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was missing or blank once trimmed.
    #[error("Username is required")]
    EmptyUsername,
    /// Username exceeds [`USERNAME_MAX`] characters.
    #[error("Username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    /// Email was missing or blank once trimmed.
    #[error("Email is required")]
    EmptyEmail,
    /// Email exceeds [`EMAIL_MAX`] characters.
    #[error("Email must be at most {max} characters")]
    EmailTooLong { max: usize },
    /// Store-assigned identifiers are strictly positive.
    #[error("user id must be positive")]
    NonPositiveId,
}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use habit_tracker::domain::UserId;
    ///
    /// let id = UserId::new(7).expect("positive id");
    /// assert_eq!(id.get(), 7);
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact email address. Only presence and length are checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account as exposed to the rest of the domain.
///
/// The password hash never leaves the persistence port; see
/// [`crate::domain::ports::StoredCredentials`].
///
/// ## Serialisation
/// `last_login` is omitted from JSON so responses keep the public
/// `{id, username, email}` shape.
///
/// # Examples
/// ```
/// use habit_tracker::domain::{EmailAddress, User, UserId, Username};
///
/// let user = User::new(
///     UserId::new(1).unwrap(),
///     Username::new("alice").unwrap(),
///     EmailAddress::new("alice@example.com").unwrap(),
/// );
/// let json = serde_json::to_value(&user).unwrap();
/// assert_eq!(json["username"], "alice");
/// assert!(json.get("last_login").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    #[serde(skip)]
    last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Build a user that has never logged in.
    #[must_use]
    pub fn new(id: UserId, username: Username, email: EmailAddress) -> Self {
        Self {
            id,
            username,
            email,
            last_login: None,
        }
    }

    /// Attach the most recent successful login instant.
    #[must_use]
    pub fn with_last_login(mut self, last_login: Option<DateTime<Utc>>) -> Self {
        self.last_login = last_login;
        self
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Instant of the most recent successful login, if any.
    #[must_use]
    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }
}
