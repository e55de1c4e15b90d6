/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool.

use serde::Serialize;
use crate::domain::compute_streaks;
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitListItem {
    pub habit_id: i64,
    pub title: String,
    pub kind: String,
    pub current_streak: u32,
    pub max_streak: u32,
    pub total_events: usize,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitListItem>,
}

/// List habits with their streak figures
pub fn list_habits<S: HabitStorage>(storage: &S) -> Result<ListHabitsResponse, ToolError> {
    let mut items = Vec::new();

    for habit in storage.list_habits()? {
        let events = storage.events_for_habit(habit.id)?;
        let summary = compute_streaks(&events);

        items.push(HabitListItem {
            habit_id: habit.id.0,
            title: habit.title,
            kind: habit.kind.display_name().to_string(),
            current_streak: summary.current_streak_length,
            max_streak: summary.max_streak_length,
            total_events: events.len(),
        });
    }

    Ok(ListHabitsResponse { habits: items })
}
