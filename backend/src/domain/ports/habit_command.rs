//! Driving port for habit mutations.

use async_trait::async_trait;

use crate::domain::{CompletionRecord, Error, Habit, HabitDraft, HabitId, UserId};

/// Outcome of tracking a habit: the habit and the ledger entry just written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedHabit {
    /// The tracked habit.
    pub habit: Habit,
    /// Newly appended completion.
    pub record: CompletionRecord,
}

/// Domain use-case port for creating and tracking habits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitCommand: Send + Sync {
    /// Create a habit for `user_id` stamped with the current time.
    async fn create_habit(&self, user_id: UserId, draft: &HabitDraft) -> Result<Habit, Error>;

    /// Append a completed entry for the caller's habit.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when the caller does
    /// not own `habit_id`.
    async fn record_completion(
        &self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> Result<TrackedHabit, Error>;
}
