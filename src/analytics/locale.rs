/// Label templates and date format used when rendering metrics
///
/// The locale is an explicit value handed to the analytics engine at startup.
/// It can be loaded from a JSON file; missing fields fall back to English.

use std::fmt::Write;
use std::path::Path;
use serde::{Deserialize, Serialize};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

/// Strings and formats for metric labels
///
/// Templates use `{days}`, `{start}`, `{end}`, `{value}` and `{date}`
/// placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsLocale {
    /// chrono format pattern for dates
    pub date_format: String,
    /// Shown when a habit has no events
    pub no_data: String,
    /// Most recent run of a checkbox habit
    pub current_streak: String,
    /// Longest run of a checkbox habit
    pub best_streak: String,
    /// Smallest recorded value of a numeric habit
    pub min_value: String,
    /// Largest recorded value of a numeric habit
    pub max_value: String,
}

impl Default for MetricsLocale {
    fn default() -> Self {
        Self {
            date_format: "%d.%m.%Y".to_string(),
            no_data: "No data yet".to_string(),
            current_streak: "Current streak: {days} days ({start} - {end})".to_string(),
            best_streak: "Best streak: {days} days ({start} - {end})".to_string(),
            min_value: "Minimum: {value} on {date}".to_string(),
            max_value: "Maximum: {value} on {date}".to_string(),
        }
    }
}

/// Errors that can occur while loading a locale file
#[derive(thiserror::Error, Debug)]
pub enum LocaleError {
    #[error("Failed to read locale file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid locale file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid date format '{format}' in locale file {path}")]
    InvalidDateFormat {
        path: String,
        format: String,
    },
}

impl MetricsLocale {
    /// Load a locale from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, LocaleError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| LocaleError::Read {
            path: display.clone(),
            source,
        })?;

        let locale: Self = serde_json::from_str(&raw).map_err(|source| LocaleError::Parse {
            path: display.clone(),
            source,
        })?;

        if !locale.has_valid_date_format() {
            return Err(LocaleError::InvalidDateFormat {
                path: display,
                format: locale.date_format,
            });
        }

        tracing::debug!("Loaded metrics locale from {}", path.display());
        Ok(locale)
    }

    /// Whether chrono understands every specifier in `date_format`
    pub fn has_valid_date_format(&self) -> bool {
        !StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
    }

    /// Format a calendar day with the configured pattern
    ///
    /// Falls back to `YYYY-MM-DD` if the pattern cannot be rendered.
    pub fn format_day(&self, day: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", day.format(&self.date_format)).is_err() {
            tracing::warn!("Date format '{}' is invalid, using ISO dates", self.date_format);
            return day.format("%Y-%m-%d").to_string();
        }
        out
    }

    /// Render a streak label from a template
    pub fn render_streak(&self, template: &str, days: u32, start: &str, end: &str) -> String {
        template
            .replace("{days}", &days.to_string())
            .replace("{start}", start)
            .replace("{end}", end)
    }

    /// Render a value label from a template
    pub fn render_value(&self, template: &str, value: f64, date: &str) -> String {
        template
            .replace("{value}", &format_value(value))
            .replace("{date}", date)
    }
}

/// Whole numbers print without a fractional part
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
