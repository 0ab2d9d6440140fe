//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{EmailAddress, User, UserId, Username};

use super::{PasswordHash, define_port_error};

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column (`username` or `email`) already holds the value.
        Duplicate { field: String } => "{field} already registered",
    }
}

/// Row to insert when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Unique login name.
    pub username: Username,
    /// Unique contact address.
    pub email: EmailAddress,
    /// Hash of the chosen password.
    pub password_hash: PasswordHash,
}

/// A user together with the stored password hash, for authentication only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// The account.
    pub user: User,
    /// Hash to verify presented passwords against.
    pub password_hash: PasswordHash,
}

/// Driven port for the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with [`UserPersistenceError::Duplicate`] when
    /// the username or email is already taken.
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError>;

    /// Fetch a user and their password hash by username.
    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Record a successful login at `at`.
    async fn record_login(&self, id: UserId, at: DateTime<Utc>)
    -> Result<(), UserPersistenceError>;
}
