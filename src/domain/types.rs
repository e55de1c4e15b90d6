/// Core types shared by the domain layer
///
/// This module defines the habit identifier, the habit kind and the
/// day length constant every streak computation is based on.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::domain::DomainError;

/// Milliseconds in one calendar day
pub const DAY_MILLIS: i64 = 86_400_000;

/// Identifier of a habit as assigned by the event store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(pub i64);

impl HabitId {
    /// Parse a habit ID from user input
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidValue {
                message: format!("'{}' is not a valid habit ID", s)
            })
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a habit is measured
///
/// Checkbox habits are either done on a day or not. Numeric habits record a
/// magnitude per event; the two numeric variants differ only in which
/// direction the user considers an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitKind {
    /// Done / not done
    Checkbox,
    /// Numeric, bigger values are better (e.g. pages read)
    NumericHigherIsBetter,
    /// Numeric, smaller values are better (e.g. cigarettes smoked)
    NumericLowerIsBetter,
}

impl HabitKind {
    /// Convert the integer tag used by the event store
    pub fn from_tag(tag: i64) -> Result<Self, DomainError> {
        match tag {
            0 => Ok(HabitKind::Checkbox),
            1 => Ok(HabitKind::NumericHigherIsBetter),
            2 => Ok(HabitKind::NumericLowerIsBetter),
            other => Err(DomainError::InvalidHabitKind(
                format!("unknown habit kind tag {}", other)
            )),
        }
    }

    /// Integer tag stored in the event store
    pub fn tag(&self) -> i64 {
        match self {
            HabitKind::Checkbox => 0,
            HabitKind::NumericHigherIsBetter => 1,
            HabitKind::NumericLowerIsBetter => 2,
        }
    }

    /// Whether events of this habit carry a meaningful value
    pub fn is_numeric(&self) -> bool {
        !matches!(self, HabitKind::Checkbox)
    }

    /// Get the display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            HabitKind::Checkbox => "checkbox",
            HabitKind::NumericHigherIsBetter => "numeric_higher",
            HabitKind::NumericLowerIsBetter => "numeric_lower",
        }
    }
}

impl FromStr for HabitKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checkbox" | "boolean" => Ok(HabitKind::Checkbox),
            "numeric_higher" | "higher" => Ok(HabitKind::NumericHigherIsBetter),
            "numeric_lower" | "lower" => Ok(HabitKind::NumericLowerIsBetter),
            other => Err(DomainError::InvalidHabitKind(format!(
                "'{}' (expected checkbox, numeric_higher or numeric_lower)",
                other
            ))),
        }
    }
}
