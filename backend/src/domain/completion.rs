//! Completion ledger entries.
//!
//! Records are append-only. Their identifiers are assigned by the store and
//! increase monotonically, which gives the statistics aggregator a total order
//! when several records fall on the same day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HabitId, UserId};

/// Store-assigned, globally unique record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionId(i64);

impl CompletionId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// A completion about to be appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompletion {
    /// Owner of the habit.
    pub user_id: UserId,
    /// Habit being tracked.
    pub habit_id: HabitId,
    /// Whether the habit was completed. Tracking through the API always
    /// records `true`.
    pub completed: bool,
    /// Instant the event happened.
    pub tracked_at: DateTime<Utc>,
}

impl NewCompletion {
    /// A completed event for `habit_id` at `tracked_at`.
    #[must_use]
    pub fn completed(user_id: UserId, habit_id: HabitId, tracked_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            habit_id,
            completed: true,
            tracked_at,
        }
    }
}

/// A stored ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Store-assigned identifier.
    pub id: CompletionId,
    /// Habit being tracked.
    pub habit_id: HabitId,
    /// Owner of the habit.
    pub user_id: UserId,
    /// Completion flag.
    pub completed: bool,
    /// Instant the event happened.
    pub tracked_at: DateTime<Utc>,
}

impl CompletionRecord {
    /// Attach a store-assigned identifier to a pending completion.
    #[must_use]
    pub fn from_new(id: CompletionId, completion: NewCompletion) -> Self {
        let NewCompletion {
            user_id,
            habit_id,
            completed,
            tracked_at,
        } = completion;
        Self {
            id,
            habit_id,
            user_id,
            completed,
            tracked_at,
        }
    }
}
