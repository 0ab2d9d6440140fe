//! Habit registry and completion ledger services.
//!
//! Every operation is scoped to the caller's user id. Habits owned by other
//! users are indistinguishable from habits that do not exist.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CompletionPersistenceError, CompletionRepository, HabitCommand, HabitPersistenceError,
    HabitQuery, HabitRepository, TrackedHabit,
};
use crate::domain::{Error, Habit, HabitDraft, HabitId, HabitStats, NewCompletion, UserId};

/// Message returned for unknown or foreign habits.
pub const HABIT_NOT_FOUND_MESSAGE: &str = "Habit not found";

/// Habit service implementing [`HabitCommand`] and [`HabitQuery`].
#[derive(Clone)]
pub struct HabitTrackingService<H, C> {
    habits: Arc<H>,
    completions: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<H, C> HabitTrackingService<H, C> {
    /// Create a new service with the given repositories.
    pub fn new(habits: Arc<H>, completions: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            habits,
            completions,
            clock,
        }
    }
}

fn map_habit_error(error: HabitPersistenceError) -> Error {
    match error {
        HabitPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("habit repository unavailable: {message}"))
        }
        HabitPersistenceError::Query { message } => {
            Error::internal(format!("habit repository error: {message}"))
        }
    }
}

fn map_completion_error(error: CompletionPersistenceError) -> Error {
    match error {
        CompletionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("completion ledger unavailable: {message}"))
        }
        CompletionPersistenceError::Query { message } => {
            Error::internal(format!("completion ledger error: {message}"))
        }
        CompletionPersistenceError::MissingHabit { .. } => Error::not_found(HABIT_NOT_FOUND_MESSAGE),
    }
}

impl<H, C> HabitTrackingService<H, C>
where
    H: HabitRepository,
    C: CompletionRepository,
{
    async fn owned_habit(&self, user_id: UserId, habit_id: HabitId) -> Result<Habit, Error> {
        self.habits
            .find(user_id, habit_id)
            .await
            .map_err(map_habit_error)?
            .ok_or_else(|| Error::not_found(HABIT_NOT_FOUND_MESSAGE))
    }
}

#[async_trait]
impl<H, C> HabitCommand for HabitTrackingService<H, C>
where
    H: HabitRepository,
    C: CompletionRepository,
{
    async fn create_habit(&self, user_id: UserId, draft: &HabitDraft) -> Result<Habit, Error> {
        let habit = self
            .habits
            .create(user_id, draft, self.clock.utc())
            .await
            .map_err(map_habit_error)?;
        info!(user_id = %user_id, habit_id = %habit.id(), "created habit");
        Ok(habit)
    }

    async fn record_completion(
        &self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> Result<TrackedHabit, Error> {
        let habit = self.owned_habit(user_id, habit_id).await?;
        let completion = NewCompletion::completed(user_id, habit_id, self.clock.utc());
        let record = self
            .completions
            .append(&completion)
            .await
            .map_err(map_completion_error)?;
        Ok(TrackedHabit { habit, record })
    }
}

#[async_trait]
impl<H, C> HabitQuery for HabitTrackingService<H, C>
where
    H: HabitRepository,
    C: CompletionRepository,
{
    async fn list_habits(&self, user_id: UserId) -> Result<Vec<Habit>, Error> {
        self.habits
            .list_for_user(user_id)
            .await
            .map_err(map_habit_error)
    }

    async fn habit_stats(&self, user_id: UserId, habit_id: HabitId) -> Result<HabitStats, Error> {
        let habit = self.owned_habit(user_id, habit_id).await?;
        let records = self
            .completions
            .list_for_habit(user_id, habit_id)
            .await
            .map_err(map_completion_error)?;
        Ok(HabitStats::aggregate(&habit, &records))
    }
}

#[cfg(test)]
#[path = "habit_tracking_service_tests.rs"]
mod tests;
