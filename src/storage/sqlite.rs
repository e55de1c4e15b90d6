/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// habits and their events. It handles all SQL queries and data conversion.

use std::path::PathBuf;
use rusqlite::{Connection, Row, params};

use crate::domain::{Habit, HabitEvent, HabitId, HabitKind, NewHabit};
use crate::storage::{StorageError, HabitStorage, migrations};

/// SQLite-based storage implementation
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file and ensure the schema exists
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::with_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        // Enable foreign key constraints
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Map a `habits` row (id, title, kind, created_at) to a Habit
    fn row_to_habit(row: &Row<'_>) -> rusqlite::Result<Habit> {
        let kind_tag: i64 = row.get(2)?;
        let kind = HabitKind::from_tag(kind_tag).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Integer, Box::new(e))
        })?;

        let created_at_str: String = row.get(3)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
            })?
            .with_timezone(&chrono::Utc);

        Ok(Habit::from_existing(
            HabitId(row.get(0)?),
            row.get(1)?, // title
            kind,
            created_at,
        ))
    }
}

impl HabitStorage for SqliteStorage {
    fn create_habit(&self, habit: &NewHabit) -> Result<Habit, StorageError> {
        self.conn.execute(
            "INSERT INTO habits (title, kind, created_at) VALUES (?1, ?2, ?3)",
            params![
                habit.title,
                habit.kind.tag(),
                habit.created_at.to_rfc3339(),
            ],
        )?;

        let id = HabitId(self.conn.last_insert_rowid());
        tracing::debug!("Created habit: {} ({})", habit.title, id);

        Ok(habit.clone().into_habit(id))
    }

    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError> {
        let result = self.conn.query_row(
            "SELECT id, title, kind, created_at FROM habits WHERE id = ?1",
            params![habit_id.0],
            Self::row_to_habit,
        );

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(StorageError::HabitNotFound { habit_id })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, kind, created_at FROM habits ORDER BY id ASC"
        )?;

        let habits = stmt
            .query_map([], Self::row_to_habit)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(habits)
    }

    fn delete_habit(&self, habit_id: HabitId) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        let events_removed = tx.execute(
            "DELETE FROM habit_events WHERE habit_id = ?1",
            params![habit_id.0],
        )?;
        let rows_affected = tx.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.0],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound { habit_id });
        }

        tx.commit()?;
        tracing::debug!("Deleted habit {} and {} events", habit_id, events_removed);
        Ok(())
    }

    fn record_event(&self, event: &HabitEvent) -> Result<(), StorageError> {
        // Surface a missing habit as HabitNotFound instead of a constraint failure
        self.get_habit(event.habit_id)?;

        self.conn.execute(
            "INSERT INTO habit_events (habit_id, date, value) VALUES (?1, ?2, ?3)",
            params![event.habit_id.0, event.date, event.value],
        )?;

        tracing::debug!("Recorded event for habit {} at {}", event.habit_id, event.date);
        Ok(())
    }

    fn events_for_habit(&self, habit_id: HabitId) -> Result<Vec<HabitEvent>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT habit_id, date, value FROM habit_events WHERE habit_id = ?1"
        )?;

        let events = stmt
            .query_map(params![habit_id.0], |row| {
                Ok(HabitEvent::from_existing(
                    HabitId(row.get(0)?),
                    row.get(1)?, // date
                    row.get(2)?, // value
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::compute_streaks;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_create_and_get_habit() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let new_habit = NewHabit::new("Read".to_string(), HabitKind::NumericHigherIsBetter).unwrap();

        let created = storage.create_habit(&new_habit).unwrap();
        let loaded = storage.get_habit(created.id).unwrap();

        assert_eq!(loaded.title, "Read");
        assert_eq!(loaded.kind, HabitKind::NumericHigherIsBetter);
        assert_eq!(loaded.created_at.timestamp(), created.created_at.timestamp());
        assert_eq!(storage.list_habits().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_habit() {
        let storage = SqliteStorage::open_in_memory().unwrap();

        assert!(matches!(
            storage.get_habit(HabitId(99)),
            Err(StorageError::HabitNotFound { .. })
        ));

        let event = HabitEvent::on_day(HabitId(99), day(1), 1.0).unwrap();
        assert!(matches!(
            storage.record_event(&event),
            Err(StorageError::HabitNotFound { .. })
        ));
    }

    #[test]
    fn test_events_feed_streaks() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let habit = storage
            .create_habit(&NewHabit::new("Walk".to_string(), HabitKind::Checkbox).unwrap())
            .unwrap();

        for d in [3, 1, 2, 2, 7] {
            storage.record_event(&HabitEvent::on_day(habit.id, day(d), 1.0).unwrap()).unwrap();
        }

        let events = storage.events_for_habit(habit.id).unwrap();
        assert_eq!(events.len(), 5);

        let summary = compute_streaks(&events);
        assert_eq!(summary.intervals.len(), 2);
        assert_eq!(summary.max_streak_length, 3);
        assert_eq!(summary.current_streak_length, 1);
    }

    #[test]
    fn test_unknown_kind_tag_is_an_error() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.conn.execute(
            "INSERT INTO habits (title, kind, created_at) VALUES ('Odd', 7, '2024-01-01T00:00:00+00:00')",
            [],
        ).unwrap();

        assert!(storage.list_habits().is_err());
    }

    #[test]
    fn test_delete_habit_removes_events() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let habit = storage
            .create_habit(&NewHabit::new("Stretch".to_string(), HabitKind::Checkbox).unwrap())
            .unwrap();
        storage.record_event(&HabitEvent::on_day(habit.id, day(1), 1.0).unwrap()).unwrap();

        storage.delete_habit(habit.id).unwrap();

        assert!(storage.events_for_habit(habit.id).unwrap().is_empty());
        assert!(matches!(
            storage.delete_habit(habit.id),
            Err(StorageError::HabitNotFound { .. })
        ));
    }
}
