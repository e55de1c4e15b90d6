/// Habit entity and related functionality
///
/// This module defines the Habit struct as loaded from the event store and
/// the validated NewHabit used to create one.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{HabitId, HabitKind, DomainError};

/// A habit the user records events for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Identifier assigned by the event store
    pub id: HabitId,
    /// Display title (e.g., "Morning Run")
    pub title: String,
    /// How the habit is measured
    pub kind: HabitKind,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a habit from existing data (used when loading from database)
    pub fn from_existing(
        id: HabitId,
        title: String,
        kind: HabitKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            kind,
            created_at,
        }
    }
}

/// A habit that has not been stored yet
///
/// The store assigns the identifier, so creation goes through this type
/// rather than through `Habit` itself.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub title: String,
    pub kind: HabitKind,
    pub created_at: DateTime<Utc>,
}

impl NewHabit {
    /// Create a new habit with validation
    pub fn new(title: String, kind: HabitKind) -> Result<Self, DomainError> {
        let title = Self::validate_title(&title)?;

        Ok(Self {
            title,
            kind,
            created_at: Utc::now(),
        })
    }

    /// Validate the title and return its trimmed form
    fn validate_title(title: &str) -> Result<String, DomainError> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit title cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit title cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(trimmed.to_string())
    }

    /// Attach the identifier the store assigned
    pub fn into_habit(self, id: HabitId) -> Habit {
        Habit::from_existing(id, self.title, self.kind, self.created_at)
    }
}
