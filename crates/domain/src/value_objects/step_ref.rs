//! Quest step references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to a quest step as stored in dialogue conditions.
///
/// Editors have written both numbers (`2`) and strings (`"2"`, `""`) into this
/// field, so both shapes are accepted. An empty string means "any step".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepRef {
    Number(i64),
    Text(String),
}

impl StepRef {
    /// The "any step" sentinel.
    pub fn any() -> Self {
        Self::Text(String::new())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Numeric value, parsing textual references when they hold a number.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Whether two references point at the same step.
    ///
    /// Numeric forms compare by value (`2` matches `"2"`), everything else
    /// compares textually.
    pub fn refers_to(&self, other: &StepRef) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Default for StepRef {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StepRef {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for StepRef {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for StepRef {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StepRef {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
