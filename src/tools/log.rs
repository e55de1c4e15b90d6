/// Tool for recording habit events
///
/// This module implements the habit_log MCP tool.

use serde::{Deserialize, Serialize};
use chrono::Utc;
use crate::domain::{compute_streaks, parse_day, HabitEvent, HabitId, DomainError};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for recording an event
#[derive(Debug, Deserialize)]
pub struct LogHabitParams {
    pub habit_id: String,
    pub date: Option<String>, // YYYY-MM-DD, defaults to today
    pub value: Option<f64>,   // Required for numeric habits
}

/// Response from recording an event
#[derive(Debug, Serialize)]
pub struct LogHabitResponse {
    pub message: String,
    pub current_streak: u32,
}

/// Record a habit event and report the recomputed streak
pub fn log_habit<S: HabitStorage>(
    storage: &S,
    params: LogHabitParams,
) -> Result<LogHabitResponse, ToolError> {
    let habit_id = HabitId::parse(&params.habit_id)?;
    let habit = storage.get_habit(habit_id)?;

    let today = Utc::now().date_naive();
    let day = match params.date.as_deref() {
        Some(date) => parse_day(date)?,
        None => today,
    };

    if day > today {
        return Err(DomainError::InvalidDate(
            "Cannot log habits for future dates".to_string()
        ).into());
    }

    let value = match (params.value, habit.kind.is_numeric()) {
        (Some(value), _) => value,
        (None, false) => 1.0,
        (None, true) => {
            return Err(ToolError::InvalidArgument(format!(
                "'{}' is a numeric habit, a value is required",
                habit.title
            )));
        }
    };

    let event = HabitEvent::on_day(habit.id, day, value)?;
    storage.record_event(&event)?;

    let summary = compute_streaks(&storage.events_for_habit(habit.id)?);
    let days = summary.current_streak_length;

    Ok(LogHabitResponse {
        message: format!(
            "🔥 Logged '{}' for {}. Current streak: {} day{}",
            habit.title,
            day,
            days,
            if days == 1 { "" } else { "s" }
        ),
        current_streak: days,
    })
}
