//! The tracked interval record and its validation rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for interval fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The interval would end before it started.
    #[error("interval cannot end before it starts (start {start}, end {end})")]
    EndBeforeStart { start: i64, end: i64 },
}

/// A single tracked span of time.
///
/// Timestamps are epoch seconds. An interval with no `end` is open: tracking
/// is still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub id: i64,
    pub start: i64,
    pub end: Option<i64>,
    pub tag: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl Interval {
    /// Seconds between start and end, or `None` while the interval is open.
    pub fn duration(&self) -> Option<i64> {
        self.end.map(|end| end - self.start)
    }

    /// Returns `true` while tracking has not been stopped.
    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Trims a tag and rejects it when nothing is left.
pub fn validate_tag(tag: &str) -> Result<&str, ValidationError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(ValidationError::Empty { field: "tag" });
    }
    Ok(tag)
}

/// Checks that `end` does not precede `start`.
pub const fn validate_bounds(start: i64, end: i64) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }
    Ok(())
}
