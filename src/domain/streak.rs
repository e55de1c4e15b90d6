/// Streak calculation over recorded habit events
///
/// This module turns an unordered collection of day-stamped events into the
/// list of contiguous day runs ("streak intervals") together with the most
/// recent run length and the longest run length.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{HabitEvent, DAY_MILLIS, day_start_millis};

/// An inclusive run of consecutive days with at least one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInterval {
    /// First day of the run (epoch millis)
    pub start_date: i64,
    /// Last day of the run (epoch millis), inclusive
    pub end_date: i64,
}

impl StreakInterval {
    pub fn new(start_date: i64, end_date: i64) -> Self {
        Self { start_date, end_date }
    }

    /// Number of days covered, both ends included
    pub fn length_days(&self) -> u32 {
        (self.end_date.saturating_sub(self.start_date) / DAY_MILLIS + 1) as u32
    }
}

/// Streak metrics derived from a habit's events
///
/// A summary is a computed view and is never stored; callers recompute it
/// whenever the underlying events change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Length in days of the most recent run
    pub current_streak_length: u32,
    /// Longest run length ever observed
    pub max_streak_length: u32,
    /// All runs, ascending by start date
    pub intervals: Vec<StreakInterval>,
}

impl StreakSummary {
    /// Summary for a habit without events
    pub fn empty() -> Self {
        Self {
            current_streak_length: 0,
            max_streak_length: 0,
            intervals: Vec::new(),
        }
    }

    /// The most recent run
    pub fn current_interval(&self) -> Option<&StreakInterval> {
        self.intervals.last()
    }

    /// The run with the largest day span; the earliest one wins ties
    pub fn best_interval(&self) -> Option<&StreakInterval> {
        let mut best: Option<&StreakInterval> = None;
        for interval in &self.intervals {
            match best {
                Some(current_best) if interval.length_days() <= current_best.length_days() => {}
                _ => best = Some(interval),
            }
        }
        best
    }

    /// Total number of distinct days with at least one event
    pub fn total_days(&self) -> u32 {
        self.intervals.iter().map(StreakInterval::length_days).sum()
    }

    /// Whether the most recent run reaches `today` or the day before
    ///
    /// `current_streak_length` reports the latest run no matter how long ago
    /// it ended; this answers the "is it still going" question separately.
    pub fn is_ongoing(&self, today: NaiveDate) -> bool {
        let today = day_start_millis(today);
        match self.current_interval() {
            Some(interval) => interval.end_date == today || interval.end_date == today - DAY_MILLIS,
            None => false,
        }
    }
}

/// Compute streak metrics from a habit's events
///
/// Events may arrive in any order. Several events on the same day count as
/// one day. Two days belong to the same run when their timestamps differ by
/// exactly one day, so callers must pass day-aligned timestamps.
pub fn compute_streaks(events: &[HabitEvent]) -> StreakSummary {
    let mut dates: Vec<i64> = events.iter().map(|e| e.date).collect();
    dates.sort_unstable();
    dates.dedup();

    let (Some(&first), Some(&last)) = (dates.first(), dates.last()) else {
        return StreakSummary::empty();
    };

    let mut intervals = Vec::new();
    let mut run_start = first;
    let mut run_length: u32 = 1;
    let mut max_length: u32 = 1;

    for pair in dates.windows(2) {
        let (previous, current) = (pair[0], pair[1]);

        if current.checked_sub(previous) == Some(DAY_MILLIS) {
            run_length += 1;
            max_length = max_length.max(run_length);
        } else {
            intervals.push(StreakInterval::new(run_start, previous));
            run_length = 1;
            run_start = current;
        }
    }

    // Close the final run
    intervals.push(StreakInterval::new(run_start, last));

    StreakSummary {
        current_streak_length: run_length,
        max_streak_length: max_length,
        intervals,
    }
}
