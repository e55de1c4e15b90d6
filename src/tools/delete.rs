/// Tool for deleting habits
///
/// This module implements the habit_delete MCP tool.

use serde::{Deserialize, Serialize};
use crate::domain::HabitId;
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for deleting a habit
#[derive(Debug, Deserialize)]
pub struct DeleteHabitParams {
    pub habit_id: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub message: String,
}

/// Delete a habit and all of its events
pub fn delete_habit<S: HabitStorage>(
    storage: &S,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let habit_id = HabitId::parse(&params.habit_id)?;
    let habit = storage.get_habit(habit_id)?;

    storage.delete_habit(habit_id)?;

    Ok(DeleteHabitResponse {
        message: format!("🗑️ Deleted habit '{}' and its history", habit.title),
    })
}
