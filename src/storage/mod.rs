/// Storage layer acting as the habit event store
///
/// This module handles all database operations using SQLite. It supplies the
/// events that streak metrics are computed from.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{Habit, HabitEvent, HabitId, NewHabit};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: HabitId },
}

/// Storage interface for habits and their events
///
/// This trait keeps the tools independent of SQLite and lets tests swap in
/// an in-memory database.
pub trait HabitStorage {
    /// Store a new habit and return it with its assigned ID
    fn create_habit(&self, habit: &NewHabit) -> Result<Habit, StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError>;

    /// List all habits, oldest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Delete a habit together with its events
    fn delete_habit(&self, habit_id: HabitId) -> Result<(), StorageError>;

    /// Record an event for an existing habit
    fn record_event(&self, event: &HabitEvent) -> Result<(), StorageError>;

    /// Get every event recorded for a habit, in no particular order
    fn events_for_habit(&self, habit_id: HabitId) -> Result<Vec<HabitEvent>, StorageError>;
}
