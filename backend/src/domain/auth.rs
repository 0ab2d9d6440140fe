//! Authentication primitives: login credentials and registration requests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::{EmailAddress, UserValidationError, Username};

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    #[error("Username is required")]
    EmptyUsername,
    /// Email was missing or blank once trimmed.
    #[error("Email is required")]
    EmptyEmail,
    /// Password was empty.
    #[error("Password is required")]
    EmptyPassword,
    /// Username or email failed a length check.
    #[error("{0}")]
    Field(UserValidationError),
}

impl CredentialsValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername
            | Self::Field(
                UserValidationError::EmptyUsername | UserValidationError::UsernameTooLong { .. },
            ) => "username",
            Self::EmptyEmail
            | Self::Field(
                UserValidationError::EmptyEmail | UserValidationError::EmailTooLong { .. },
            ) => "email",
            Self::EmptyPassword | Self::Field(UserValidationError::NonPositiveId) => "password",
        }
    }
}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyUsername => Self::EmptyUsername,
            UserValidationError::EmptyEmail => Self::EmptyEmail,
            other => Self::Field(other),
        }
    }
}

fn require_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace so credential comparison stays exact.
///
/// # Examples
/// ```
/// use habit_tracker::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "s3cret").unwrap();
/// assert_eq!(creds.username().as_str(), "alice");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        let password = require_password(password)?;
        Ok(Self { username, password })
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
///
/// Fields are checked in the order username, email, password so the first
/// missing field is the one reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw inputs.
    ///
    /// # Examples
    /// ```
    /// use habit_tracker::domain::{CredentialsValidationError, Registration};
    ///
    /// let err = Registration::try_from_parts("alice", "", "pw").unwrap_err();
    /// assert_eq!(err, CredentialsValidationError::EmptyEmail);
    /// assert_eq!(err.to_string(), "Email is required");
    /// ```
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        let password = require_password(password)?;
        Ok(Self {
            username,
            email,
            password,
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password to be hashed before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
