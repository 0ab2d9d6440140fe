//! PostgreSQL-backed completion ledger using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CompletionPersistenceError, CompletionRepository};
use crate::domain::{CompletionId, CompletionRecord, HabitId, NewCompletion, UserId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewTrackRecordRow, TrackRecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::track_records;

/// Diesel-backed implementation of the [`CompletionRepository`] port.
#[derive(Clone)]
pub struct DieselCompletionRepository {
    pool: DbPool,
}

impl DieselCompletionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CompletionPersistenceError {
    map_basic_pool_error(error, CompletionPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CompletionPersistenceError {
    map_basic_diesel_error(
        error,
        CompletionPersistenceError::query,
        CompletionPersistenceError::connection,
    )
}

fn row_to_record(row: TrackRecordRow) -> Result<CompletionRecord, CompletionPersistenceError> {
    let habit_id = HabitId::new(row.habit_id).map_err(|err| {
        CompletionPersistenceError::query(format!("track record {}: {err}", row.id))
    })?;
    let user_id = UserId::new(row.user_id).map_err(|err| {
        CompletionPersistenceError::query(format!("track record {}: {err}", row.id))
    })?;
    Ok(CompletionRecord {
        id: CompletionId::new(row.id),
        habit_id,
        user_id,
        completed: row.completed,
        tracked_at: row.tracked_at,
    })
}

#[async_trait]
impl CompletionRepository for DieselCompletionRepository {
    async fn append(
        &self,
        completion: &NewCompletion,
    ) -> Result<CompletionRecord, CompletionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewTrackRecordRow {
            habit_id: completion.habit_id.get(),
            user_id: completion.user_id.get(),
            completed: completion.completed,
            tracked_at: completion.tracked_at,
        };

        let row: TrackRecordRow = diesel::insert_into(track_records::table)
            .values(&new_row)
            .returning(TrackRecordRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    CompletionPersistenceError::missing_habit(completion.habit_id.get())
                } else {
                    map_diesel_error(err)
                }
            })?;
        row_to_record(row)
    }

    async fn list_for_habit(
        &self,
        user_id: UserId,
        habit_id: HabitId,
    ) -> Result<Vec<CompletionRecord>, CompletionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TrackRecordRow> = track_records::table
            .filter(track_records::user_id.eq(user_id.get()))
            .filter(track_records::habit_id.eq(habit_id.get()))
            .order_by(track_records::id.asc())
            .select(TrackRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_record).collect()
    }
}
