//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services that implement the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): registered account identity.
//! - Habit / HabitStats: per-user habits and their ledger summaries.

pub mod auth;
pub mod completion;
pub mod error;
pub mod habit;
mod habit_tracking_service;
mod motivation_service;
pub mod ports;
pub mod quote;
pub mod stats;
pub mod trace_id;
pub mod user;
mod user_accounts_service;

pub use self::auth::{CredentialsValidationError, LoginCredentials, Registration};
pub use self::completion::{CompletionId, CompletionRecord, NewCompletion};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::habit::{
    HABIT_NAME_MAX, Habit, HabitDraft, HabitId, HabitName, HabitValidationError,
};
pub use self::habit_tracking_service::{HABIT_NOT_FOUND_MESSAGE, HabitTrackingService};
pub use self::motivation_service::{MotivationService, QUOTE_DECODE_FAILED, QUOTE_FETCH_FAILED};
pub use self::quote::{MOTIVATION_CATEGORY, Quote};
pub use self::stats::HabitStats;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, USERNAME_MAX, User, UserId, UserValidationError, Username,
};
pub use self::user_accounts_service::{NO_SESSION_MESSAGE, UserAccountsService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use habit_tracker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("No user is currently logged in"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
