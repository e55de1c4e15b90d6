/// Domain module containing the habit entities and streak calculation
///
/// This module defines the core entities (Habit, HabitEvent, StreakSummary)
/// and the pure computation that turns recorded events into streak metrics.

pub mod habit;
pub mod event;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use event::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid habit kind: {0}")]
    InvalidHabitKind(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
