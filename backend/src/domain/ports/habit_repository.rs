//! Port abstraction for the habit registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Habit, HabitDraft, HabitId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by habit repository adapters.
    pub enum HabitPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "habit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "habit repository query failed: {message}",
    }
}

/// Driven port for per-user habits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Store a new habit for `user_id`, assigning the next per-user id.
    ///
    /// Implementations allocate the id atomically: concurrent calls for the
    /// same user never receive the same id.
    async fn create(
        &self,
        user_id: UserId,
        draft: &HabitDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Habit, HabitPersistenceError>;

    /// All habits owned by `user_id`, in ascending id order.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Habit>, HabitPersistenceError>;

    /// A single habit, if `user_id` owns one with `habit_id`.
    async fn find(
        &self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> Result<Option<Habit>, HabitPersistenceError>;
}
