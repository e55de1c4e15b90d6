/// Streak and metrics tests through the public API
use habit_metrics_mcp::*;
use chrono::{NaiveDate, Utc};

#[cfg(test)]
mod streak_tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn events(days: &[u32]) -> Vec<HabitEvent> {
        days.iter()
            .map(|&d| HabitEvent::on_day(HabitId(1), day(d), 1.0).unwrap())
            .collect()
    }

    fn interval(start: u32, end: u32) -> StreakInterval {
        StreakInterval::new(day_start_millis(day(start)), day_start_millis(day(end)))
    }

    #[test]
    fn test_empty_summary() {
        let summary = compute_streaks(&[]);
        assert_eq!(summary.current_streak_length, 0);
        assert_eq!(summary.max_streak_length, 0);
        assert!(summary.intervals.is_empty());
    }

    #[test]
    fn test_scenarios() {
        let a = compute_streaks(&events(&[1, 2, 3]));
        assert_eq!(a.intervals, vec![interval(1, 3)]);
        assert_eq!((a.current_streak_length, a.max_streak_length), (3, 3));

        let b = compute_streaks(&events(&[1, 2, 5, 6, 7]));
        assert_eq!(b.intervals, vec![interval(1, 2), interval(5, 7)]);
        assert_eq!((b.current_streak_length, b.max_streak_length), (3, 3));

        let c = compute_streaks(&events(&[1, 3, 5]));
        assert_eq!(c.intervals, vec![interval(1, 1), interval(3, 3), interval(5, 5)]);
        assert_eq!((c.current_streak_length, c.max_streak_length), (1, 1));
    }

    #[test]
    fn test_month_boundary_is_consecutive() {
        let events = vec![
            HabitEvent::on_day(HabitId(1), NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(), 1.0).unwrap(),
            HabitEvent::on_day(HabitId(1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), 1.0).unwrap(),
            HabitEvent::on_day(HabitId(1), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 1.0).unwrap(),
        ];

        let summary = compute_streaks(&events);
        assert_eq!(summary.intervals.len(), 1);
        assert_eq!(summary.current_streak_length, 3);
    }

    #[test]
    fn test_distinct_day_count_property() {
        let inputs: [&[u32]; 4] = [
            &[1],
            &[5, 5, 5],
            &[1, 2, 2, 4, 9, 10, 10, 11, 20],
            &[30, 29, 28, 1, 3, 2],
        ];

        for days in inputs {
            let summary = compute_streaks(&events(days));
            let mut distinct = days.to_vec();
            distinct.sort_unstable();
            distinct.dedup();

            assert_eq!(summary.total_days() as usize, distinct.len());
            assert!(summary.max_streak_length >= summary.current_streak_length);
        }
    }

    #[test]
    fn test_describe_metrics_checkbox_tie() {
        let habit = Habit::from_existing(HabitId(1), "Journal".to_string(), HabitKind::Checkbox, Utc::now());
        let labels = describe_metrics(&habit, &events(&[10, 11, 1, 2, 20]), &MetricsLocale::default());

        assert_eq!(labels.best, "Best streak: 2 days (01.06.2024 - 02.06.2024)");
        assert_eq!(labels.current, "Current streak: 1 days (20.06.2024 - 20.06.2024)");
    }

    #[test]
    fn test_describe_metrics_numeric() {
        let habit = Habit::from_existing(HabitId(1), "Pushups".to_string(), HabitKind::NumericHigherIsBetter, Utc::now());
        let events = vec![
            HabitEvent::on_day(HabitId(1), day(3), 20.0).unwrap(),
            HabitEvent::on_day(HabitId(1), day(1), 35.0).unwrap(),
            HabitEvent::on_day(HabitId(1), day(2), 12.0).unwrap(),
        ];

        let labels = describe_metrics(&habit, &events, &MetricsLocale::default());
        assert_eq!(labels.current, "Minimum: 12 on 02.06.2024");
        assert_eq!(labels.best, "Maximum: 35 on 01.06.2024");
    }
}

#[cfg(test)]
mod storage_tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());

        // Usable through the trait object
        let storage = storage.unwrap();
        let _: &dyn HabitStorage = &storage;
    }

    #[test]
    fn test_habits_persist_across_opens() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let path = temp_file.path().to_path_buf();

        let habit_id = {
            let storage = SqliteStorage::new(path.clone()).expect("Failed to open storage");
            let habit = storage
                .create_habit(&NewHabit::new("Sleep early".to_string(), HabitKind::Checkbox).unwrap())
                .unwrap();
            storage
                .record_event(&HabitEvent::on_day(habit.id, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 1.0).unwrap())
                .unwrap();
            habit.id
        };

        let storage = SqliteStorage::new(path).expect("Failed to reopen storage");
        assert_eq!(storage.get_habit(habit_id).unwrap().title, "Sleep early");
        assert_eq!(storage.events_for_habit(habit_id).unwrap().len(), 1);
    }
}
