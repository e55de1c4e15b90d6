/// Tool for checking habit streaks and metrics
///
/// This module implements the habit_status MCP tool.

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, Utc};
use crate::analytics::{AnalyticsEngine, MetricsLabels};
use crate::domain::{Habit, HabitEvent, HabitId, StreakSummary};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for checking habit status
#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub habit_id: Option<String>, // If omitted, returns all habits
}

/// Metrics for a single habit
#[derive(Debug, Serialize)]
pub struct HabitStatus {
    pub habit_id: i64,
    pub title: String,
    pub kind: String,
    pub summary: StreakSummary,
    pub labels: MetricsLabels,
    /// Whether the latest run reaches today or yesterday
    pub ongoing: bool,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habits: Vec<HabitStatus>,
    pub message: String,
}

/// Compute streaks and labels for one habit or for all of them
pub fn get_habit_status<S: HabitStorage>(
    storage: &S,
    analytics: &AnalyticsEngine,
    params: StatusParams,
) -> Result<StatusResponse, ToolError> {
    let habits = match params.habit_id.as_deref() {
        Some(id) => vec![storage.get_habit(HabitId::parse(id)?)?],
        None => storage.list_habits()?,
    };

    let today = Utc::now().date_naive();
    let mut statuses = Vec::with_capacity(habits.len());

    for habit in habits {
        let events = storage.events_for_habit(habit.id)?;
        statuses.push(habit_status(analytics, habit, &events, today));
    }

    let message = if statuses.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        statuses.iter()
            .map(|s| format!(
                "🎯 {} (#{}, {})\n   {}\n   {}",
                s.title,
                s.habit_id,
                s.kind,
                s.labels.current,
                s.labels.best
            ))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Ok(StatusResponse {
        habits: statuses,
        message,
    })
}

fn habit_status(
    analytics: &AnalyticsEngine,
    habit: Habit,
    events: &[HabitEvent],
    today: NaiveDate,
) -> HabitStatus {
    let summary = analytics.streak_summary(events);
    let labels = analytics.describe_metrics(&habit, events);
    let ongoing = summary.is_ongoing(today);

    HabitStatus {
        habit_id: habit.id.0,
        title: habit.title,
        kind: habit.kind.display_name().to_string(),
        summary,
        labels,
        ongoing,
    }
}
