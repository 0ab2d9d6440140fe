//! User account domain services.
//!
//! Implements registration, login, and the current-user lookup on top of the
//! user repository and password hasher ports. Passwords are hashed before
//! they reach the repository and verified against the stored hash on login.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    CurrentUserQuery, LoginService, NewUserRecord, PasswordHashError, PasswordHasher,
    RegistrationService, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

/// Message returned when a request carries no usable session.
pub const NO_SESSION_MESSAGE: &str = "No user is currently logged in";

/// Account service implementing the user-side driving ports.
#[derive(Clone)]
pub struct UserAccountsService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<R, H> UserAccountsService<R, H> {
    /// Create a new service over the given repository and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { field } => duplicate_conflict(&field),
    }
}

fn duplicate_conflict(field: &str) -> Error {
    let message = match field {
        "username" => "Username already exists",
        "email" => "Email already exists",
        _ => "Username or email already exists",
    };
    Error::conflict(message).with_details(json!({ "field": field, "code": "duplicate" }))
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R, H> RegistrationService for UserAccountsService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;
        let record = NewUserRecord {
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
        };
        let user = self
            .users
            .insert(&record)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), "registered user");
        Ok(user)
    }
}

#[async_trait]
impl<R, H> LoginService for UserAccountsService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(map_persistence_error)?
        else {
            return Err(Error::not_found("User not found"));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .map_err(map_hash_error)?;
        if !matches {
            warn!(user_id = %stored.user.id(), "rejected login with invalid password");
            return Err(Error::unauthorized("Invalid password"));
        }

        let now = self.clock.utc();
        self.users
            .record_login(stored.user.id(), now)
            .await
            .map_err(map_persistence_error)?;
        Ok(stored.user.with_last_login(Some(now)))
    }
}

#[async_trait]
impl<R, H> CurrentUserQuery for UserAccountsService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn current_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unauthorized(NO_SESSION_MESSAGE))
    }
}

#[cfg(test)]
#[path = "user_accounts_service_tests.rs"]
mod tests;
