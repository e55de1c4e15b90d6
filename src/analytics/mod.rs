/// Analytics engine for turning habit events into metrics
///
/// This module wraps the streak calculation and renders the metric labels
/// shown to the user, using the locale handed in at startup.

pub mod locale;

pub use locale::{LocaleError, MetricsLocale};

use serde::Serialize;
use crate::domain::{compute_streaks, millis_to_day, Habit, HabitEvent, HabitKind, StreakSummary};

/// Pair of rendered labels describing a habit's metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsLabels {
    /// Current streak (checkbox) or minimum value (numeric)
    pub current: String,
    /// Best streak (checkbox) or maximum value (numeric)
    pub best: String,
}

/// Analytics engine for processing habit data
pub struct AnalyticsEngine {
    locale: MetricsLocale,
}

impl AnalyticsEngine {
    /// Create a new analytics engine rendering with `locale`
    pub fn new(locale: MetricsLocale) -> Self {
        Self { locale }
    }

    /// Calculate streak information from a habit's events
    pub fn streak_summary(&self, events: &[HabitEvent]) -> StreakSummary {
        compute_streaks(events)
    }

    /// Render the current/best labels for a habit
    pub fn describe_metrics(&self, habit: &Habit, events: &[HabitEvent]) -> MetricsLabels {
        describe_metrics(habit, events, &self.locale)
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(MetricsLocale::default())
    }
}

/// Render the current/best labels for a habit
///
/// Checkbox habits describe their most recent and their longest run.
/// Numeric habits describe their smallest and largest single event instead.
pub fn describe_metrics(habit: &Habit, events: &[HabitEvent], locale: &MetricsLocale) -> MetricsLabels {
    if events.is_empty() {
        return no_data(locale);
    }

    match habit.kind {
        HabitKind::Checkbox => describe_streaks(events, locale),
        HabitKind::NumericHigherIsBetter | HabitKind::NumericLowerIsBetter => {
            describe_extremes(events, locale)
        }
    }
}

fn no_data(locale: &MetricsLocale) -> MetricsLabels {
    MetricsLabels {
        current: locale.no_data.clone(),
        best: locale.no_data.clone(),
    }
}

fn describe_streaks(events: &[HabitEvent], locale: &MetricsLocale) -> MetricsLabels {
    let summary = compute_streaks(events);

    let (Some(current), Some(best)) = (summary.current_interval(), summary.best_interval()) else {
        return no_data(locale);
    };

    let render = |template: &str, start: i64, end: i64, days: u32| {
        locale.render_streak(template, days, &format_date(start, locale), &format_date(end, locale))
    };

    MetricsLabels {
        current: render(locale.current_streak.as_str(), current.start_date, current.end_date, summary.current_streak_length),
        best: render(locale.best_streak.as_str(), best.start_date, best.end_date, best.length_days()),
    }
}

fn describe_extremes(events: &[HabitEvent], locale: &MetricsLocale) -> MetricsLabels {
    // Ties on value go to the earliest day so the result does not depend on input order
    let min = events.iter().min_by(|a, b| {
        a.value.total_cmp(&b.value).then(a.date.cmp(&b.date))
    });
    let max = events.iter().max_by(|a, b| {
        a.value.total_cmp(&b.value).then(b.date.cmp(&a.date))
    });

    let (Some(min), Some(max)) = (min, max) else {
        return no_data(locale);
    };

    MetricsLabels {
        current: locale.render_value(&locale.min_value, min.value, &format_date(min.date, locale)),
        best: locale.render_value(&locale.max_value, max.value, &format_date(max.date, locale)),
    }
}

fn format_date(millis: i64, locale: &MetricsLocale) -> String {
    match millis_to_day(millis) {
        Some(day) => locale.format_day(day),
        None => {
            tracing::warn!("Timestamp {} is out of range for date formatting", millis);
            millis.to_string()
        }
    }
}
