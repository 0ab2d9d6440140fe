//! Statistics aggregation over a habit's completion ledger.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::{CompletionRecord, Habit};

/// Summary counts derived from a habit's ledger.
///
/// ## Invariants
/// - `completed_days + skipped_days` equals the number of distinct UTC
///   calendar dates among the records.
/// - `first_tracked <= last_tracked` whenever both are present; both are
///   `None` exactly when `total_trackings == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStats {
    /// Name of the habit the ledger belongs to.
    pub habit_name: String,
    /// Number of ledger entries.
    pub total_trackings: usize,
    /// Distinct dates whose final entry was completed.
    pub completed_days: usize,
    /// Distinct dates whose final entry was not completed.
    pub skipped_days: usize,
    /// Earliest raw timestamp across all entries.
    pub first_tracked: Option<DateTime<Utc>>,
    /// Latest raw timestamp across all entries.
    pub last_tracked: Option<DateTime<Utc>>,
}

impl HabitStats {
    /// Reduce `records` into summary counts for `habit`.
    ///
    /// Records are taken in ascending id order. When several records share a
    /// calendar date the one with the highest id decides that date's status.
    /// Records belonging to other habits are ignored.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use habit_tracker::domain::{
    ///     CompletionId, CompletionRecord, Habit, HabitDraft, HabitId, HabitStats, UserId,
    /// };
    ///
    /// let user = UserId::new(1).unwrap();
    /// let created = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
    /// let habit = Habit::new(
    ///     HabitId::first(),
    ///     user,
    ///     HabitDraft::try_from_parts("Exercise", None).unwrap(),
    ///     created,
    /// );
    /// let records: Vec<_> = [9, 18]
    ///     .into_iter()
    ///     .enumerate()
    ///     .map(|(i, hour)| CompletionRecord {
    ///         id: CompletionId::new(i as i64 + 1),
    ///         habit_id: HabitId::first(),
    ///         user_id: user,
    ///         completed: true,
    ///         tracked_at: Utc.with_ymd_and_hms(2025, 1, 2, hour, 0, 0).unwrap(),
    ///     })
    ///     .collect();
    ///
    /// let stats = HabitStats::aggregate(&habit, &records);
    /// assert_eq!(stats.total_trackings, 2);
    /// assert_eq!(stats.completed_days, 1);
    /// assert_eq!(stats.skipped_days, 0);
    /// ```
    #[must_use]
    pub fn aggregate(habit: &Habit, records: &[CompletionRecord]) -> Self {
        let mut ordered: Vec<&CompletionRecord> = records
            .iter()
            .filter(|record| record.habit_id == habit.id() && record.user_id == habit.user_id())
            .collect();
        ordered.sort_by_key(|record| record.id);

        let mut day_status: BTreeMap<NaiveDate, bool> = BTreeMap::new();
        let mut first_tracked: Option<DateTime<Utc>> = None;
        let mut last_tracked: Option<DateTime<Utc>> = None;

        for record in &ordered {
            day_status.insert(record.tracked_at.date_naive(), record.completed);
            first_tracked = Some(first_tracked.map_or(record.tracked_at, |current| {
                current.min(record.tracked_at)
            }));
            last_tracked = Some(last_tracked.map_or(record.tracked_at, |current| {
                current.max(record.tracked_at)
            }));
        }

        let completed_days = day_status.values().filter(|completed| **completed).count();
        let skipped_days = day_status.len() - completed_days;

        Self {
            habit_name: habit.name().as_str().to_owned(),
            total_trackings: ordered.len(),
            completed_days,
            skipped_days,
            first_tracked,
            last_tracked,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the aggregation rules.
    use super::*;
    use crate::domain::{CompletionId, HabitDraft, HabitId, UserId};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn user() -> UserId {
        UserId::new(1).expect("fixture user")
    }

    #[fixture]
    fn habit() -> Habit {
        Habit::new(
            HabitId::first(),
            user(),
            HabitDraft::try_from_parts("Exercise", None).expect("fixture draft"),
            at(1, 6),
        )
    }

    fn record(id: i64, tracked_at: DateTime<Utc>, completed: bool) -> CompletionRecord {
        CompletionRecord {
            id: CompletionId::new(id),
            habit_id: HabitId::first(),
            user_id: user(),
            completed,
            tracked_at,
        }
    }

    #[rstest]
    fn empty_ledger_has_no_bounds(habit: Habit) {
        let stats = HabitStats::aggregate(&habit, &[]);

        assert_eq!(stats.habit_name, "Exercise");
        assert_eq!(stats.total_trackings, 0);
        assert_eq!(stats.completed_days, 0);
        assert_eq!(stats.skipped_days, 0);
        assert!(stats.first_tracked.is_none());
        assert!(stats.last_tracked.is_none());
    }

    #[rstest]
    fn same_day_completions_count_once(habit: Habit) {
        let records = [record(1, at(2, 9), true), record(2, at(2, 21), true)];
        let stats = HabitStats::aggregate(&habit, &records);

        assert_eq!(stats.total_trackings, 2);
        assert_eq!(stats.completed_days, 1);
        assert_eq!(stats.skipped_days, 0);
    }

    #[rstest]
    #[case::later_skip_wins(true, false, 0, 1)]
    #[case::later_completion_wins(false, true, 1, 0)]
    fn highest_id_decides_a_shared_date(
        habit: Habit,
        #[case] first: bool,
        #[case] second: bool,
        #[case] completed_days: usize,
        #[case] skipped_days: usize,
    ) {
        // Supplied out of order to prove the aggregator sorts by id.
        let records = [record(8, at(4, 20), second), record(3, at(4, 7), first)];
        let stats = HabitStats::aggregate(&habit, &records);

        assert_eq!(stats.completed_days, completed_days);
        assert_eq!(stats.skipped_days, skipped_days);
    }

    #[rstest]
    fn bounds_use_raw_timestamps_not_dates(habit: Habit) {
        let records = [
            record(1, at(5, 12), true),
            record(2, at(3, 23), false),
            record(3, at(7, 1), true),
            record(4, at(3, 2), true),
        ];
        let stats = HabitStats::aggregate(&habit, &records);

        assert_eq!(stats.first_tracked, Some(at(3, 2)));
        assert_eq!(stats.last_tracked, Some(at(7, 1)));
        assert_eq!(stats.total_trackings, 4);
        assert_eq!(stats.completed_days + stats.skipped_days, 3);
    }

    #[rstest]
    fn ignores_records_for_other_habits(habit: Habit) {
        let mut foreign = record(2, at(6, 10), true);
        foreign.habit_id = HabitId::new(2).expect("fixture habit id");
        let records = [record(1, at(6, 9), true), foreign];

        let stats = HabitStats::aggregate(&habit, &records);
        assert_eq!(stats.total_trackings, 1);
    }
}
