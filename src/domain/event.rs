/// HabitEvent entity for recorded habit occurrences
///
/// One event is one recorded occurrence of a habit on a calendar day. The
/// day is carried as epoch milliseconds at the start of the day (UTC).

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{HabitId, DomainError, DAY_MILLIS};

/// A recorded occurrence of a habit on a given day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitEvent {
    /// Which habit this event belongs to
    pub habit_id: HabitId,
    /// Day of the event in epoch milliseconds, truncated to the day boundary
    pub date: i64,
    /// Magnitude recorded for numeric habits (1.0 for checkbox habits)
    pub value: f64,
}

impl HabitEvent {
    /// Create a new event for a calendar day with validation
    pub fn on_day(habit_id: HabitId, day: NaiveDate, value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidValue {
                message: "Event value must be a finite number".to_string()
            });
        }

        Ok(Self {
            habit_id,
            date: day_start_millis(day),
            value,
        })
    }

    /// Create an event from existing data (used when loading from database)
    pub fn from_existing(habit_id: HabitId, date: i64, value: f64) -> Self {
        Self { habit_id, date, value }
    }

    /// The calendar day of this event, if the timestamp is representable
    pub fn day(&self) -> Option<NaiveDate> {
        millis_to_day(self.date)
    }
}

/// Epoch milliseconds at the start of `day` (UTC)
pub fn day_start_millis(day: NaiveDate) -> i64 {
    day.signed_duration_since(DateTime::<Utc>::UNIX_EPOCH.date_naive()).num_days() * DAY_MILLIS
}

/// Calendar day (UTC) containing `millis`
pub fn millis_to_day(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_day(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        DomainError::InvalidDate(format!("'{}' is not a valid date (expected YYYY-MM-DD)", s))
    })
}
