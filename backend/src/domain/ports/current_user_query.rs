//! Driving port for reading the session's user.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for the `/me` lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Load the user bound to the caller's session.
    async fn current_user(&self, user_id: UserId) -> Result<User, Error>;
}
