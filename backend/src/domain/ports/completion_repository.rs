//! Port abstraction for the append-only completion ledger.

use async_trait::async_trait;

use crate::domain::{CompletionRecord, HabitId, NewCompletion, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by completion ledger adapters.
    pub enum CompletionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "completion ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "completion ledger query failed: {message}",
        /// The referenced habit does not exist for the user.
        MissingHabit { habit_id: i32 } => "habit {habit_id} does not exist",
    }
}

/// Driven port for completion events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Append a completion and return it with its store-assigned id.
    async fn append(
        &self,
        completion: &NewCompletion,
    ) -> Result<CompletionRecord, CompletionPersistenceError>;

    /// Every record for one habit, in ascending id order.
    async fn list_for_habit(
        &self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> Result<Vec<CompletionRecord>, CompletionPersistenceError>;
}
