//! Driving port for habit reads.

use async_trait::async_trait;

use crate::domain::{Error, Habit, HabitId, HabitStats, UserId};

/// Domain use-case port for listing habits and summarising their ledgers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitQuery: Send + Sync {
    /// All habits owned by `user_id`, ascending by id.
    async fn list_habits(&self, user_id: UserId) -> Result<Vec<Habit>, Error>;

    /// Statistics for one of the caller's habits.
    async fn habit_stats(&self, user_id: UserId, habit_id: HabitId) -> Result<HabitStats, Error>;
}
