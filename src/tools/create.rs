/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use serde::{Deserialize, Serialize};
use crate::domain::{HabitKind, NewHabit};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize)]
pub struct CreateHabitParams {
    pub title: String,
    pub kind: Option<String>, // Parsed to HabitKind, defaults to checkbox
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub habit_id: i64,
    pub message: String,
}

/// Create a new habit using the provided storage
pub fn create_habit<S: HabitStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let kind = match params.kind.as_deref() {
        Some(kind) => kind.parse::<HabitKind>()?,
        None => HabitKind::Checkbox,
    };

    let new_habit = NewHabit::new(params.title, kind)?;
    let habit = storage.create_habit(&new_habit)?;

    Ok(CreateHabitResponse {
        habit_id: habit.id.0,
        message: format!(
            "✅ Created habit '{}' ({})",
            habit.title,
            habit.kind.display_name()
        ),
    })
}
