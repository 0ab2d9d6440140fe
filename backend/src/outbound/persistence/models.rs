//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{habit_counters, habits, track_records, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub last_login: Option<DateTime<Utc>>,
    #[expect(dead_code, reason = "audit column read alongside the account")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for registering a user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Habit models
// ---------------------------------------------------------------------------

/// Insertable struct seeding a user's habit counter.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habit_counters)]
pub(crate) struct NewHabitCounterRow {
    pub user_id: i64,
    pub last_habit_id: i32,
}

/// Row struct for reading from the habits table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HabitRow {
    pub user_id: i64,
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating habits.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habits)]
pub(crate) struct NewHabitRow<'a> {
    pub user_id: i64,
    pub id: i32,
    pub name: &'a str,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Completion ledger models
// ---------------------------------------------------------------------------

/// Row struct for reading from the track_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = track_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrackRecordRow {
    pub id: i64,
    pub habit_id: i32,
    pub user_id: i64,
    pub completed: bool,
    pub tracked_at: DateTime<Utc>,
}

/// Insertable struct for appending completions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = track_records)]
pub(crate) struct NewTrackRecordRow {
    pub habit_id: i32,
    pub user_id: i64,
    pub completed: bool,
    pub tracked_at: DateTime<Utc>,
}
