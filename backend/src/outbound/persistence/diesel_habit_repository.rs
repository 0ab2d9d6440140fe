//! PostgreSQL-backed `HabitRepository` implementation using Diesel ORM.
//!
//! Per-user habit ids come from the `habit_counters` table. The counter
//! upsert and the habit insert share a transaction, so the row lock taken by
//! the upsert serialises concurrent creations for the same user.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{HabitPersistenceError, HabitRepository};
use crate::domain::{Habit, HabitDraft, HabitId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{HabitRow, NewHabitCounterRow, NewHabitRow};
use super::pool::{DbPool, PoolError};
use super::schema::{habit_counters, habits};

/// Diesel-backed implementation of the [`HabitRepository`] port.
#[derive(Clone)]
pub struct DieselHabitRepository {
    pool: DbPool,
}

impl DieselHabitRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HabitPersistenceError {
    map_basic_pool_error(error, HabitPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HabitPersistenceError {
    map_basic_diesel_error(
        error,
        HabitPersistenceError::query,
        HabitPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain habit.
pub(super) fn row_to_habit(row: HabitRow) -> Result<Habit, HabitPersistenceError> {
    let HabitRow {
        user_id,
        id,
        name,
        description,
        created_at,
    } = row;
    let habit_id = HabitId::new(id)
        .map_err(|err| HabitPersistenceError::query(format!("stored habit id {id}: {err}")))?;
    let owner = UserId::new(user_id).map_err(|err| {
        HabitPersistenceError::query(format!("stored habit owner {user_id}: {err}"))
    })?;
    let draft = HabitDraft::try_from_parts(&name, Some(&description)).map_err(|err| {
        HabitPersistenceError::query(format!("stored habit {owner}/{habit_id}: {err}"))
    })?;
    Ok(Habit::new(habit_id, owner, draft, created_at))
}

#[async_trait]
impl HabitRepository for DieselHabitRepository {
    async fn create(
        &self,
        user_id: UserId,
        draft: &HabitDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Habit, HabitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = user_id.get();
        let name = draft.name().as_str();
        let description = draft.description();

        let row = conn
            .transaction(|conn| {
                async move {
                    let next_id: i32 = diesel::insert_into(habit_counters::table)
                        .values(&NewHabitCounterRow {
                            user_id: owner,
                            last_habit_id: 1,
                        })
                        .on_conflict(habit_counters::user_id)
                        .do_update()
                        .set(habit_counters::last_habit_id.eq(habit_counters::last_habit_id + 1))
                        .returning(habit_counters::last_habit_id)
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(habits::table)
                        .values(&NewHabitRow {
                            user_id: owner,
                            id: next_id,
                            name,
                            description,
                            created_at,
                        })
                        .returning(HabitRow::as_returning())
                        .get_result::<HabitRow>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(user_id = owner, habit_id = row.id, "allocated habit id");
        row_to_habit(row)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Habit>, HabitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<HabitRow> = habits::table
            .filter(habits::user_id.eq(user_id.get()))
            .order_by(habits::id.asc())
            .select(HabitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_habit).collect()
    }

    async fn find(
        &self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> Result<Option<Habit>, HabitPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<HabitRow> = habits::table
            .find((user_id.get(), habit_id.get()))
            .select(HabitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_habit).transpose()
    }
}
