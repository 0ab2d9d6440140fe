//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod completion_repository;
mod current_user_query;
mod habit_command;
mod habit_query;
mod habit_repository;
mod identity_resolver;
mod login_service;
mod motivation_query;
mod password_hasher;
mod quote_source;
mod registration_service;
mod user_repository;

#[cfg(test)]
pub use completion_repository::MockCompletionRepository;
pub use completion_repository::{CompletionPersistenceError, CompletionRepository};
#[cfg(test)]
pub use current_user_query::MockCurrentUserQuery;
pub use current_user_query::CurrentUserQuery;
#[cfg(test)]
pub use habit_command::MockHabitCommand;
pub use habit_command::{HabitCommand, TrackedHabit};
#[cfg(test)]
pub use habit_query::MockHabitQuery;
pub use habit_query::HabitQuery;
#[cfg(test)]
pub use habit_repository::MockHabitRepository;
pub use habit_repository::{HabitPersistenceError, HabitRepository};
#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use identity_resolver::{
    IdentityResolver, IdentityResolverError, SESSION_COOKIE_NAME, SessionCookie,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use motivation_query::MockMotivationQuery;
pub use motivation_query::MotivationQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHash, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use quote_source::MockQuoteSource;
pub use quote_source::{QuoteSource, QuoteSourceError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUserRecord, StoredCredentials, UserPersistenceError, UserRepository};
