//! Schedule types shared by the parser and the sinks.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Whether a scheduling plan spans one day or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    SingleDay,
    MultiDay,
}

impl PlanKind {
    /// Whether the caller should ask for an explicit "Day 1" date.
    pub fn needs_anchor(kind: Option<PlanKind>) -> bool {
        !matches!(kind, Some(PlanKind::SingleDay))
    }
}

/// A resolved calendar event.
///
/// `end` is not checked against `start` here; reversed intervals are kept
/// and reported through a diagnostic instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ScheduledEvent {
    pub fn new(name: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Display duration, `end - start`. May be zero or negative.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Duration in fractional hours, for listings.
    pub fn hours(&self) -> f64 {
        self.duration().num_minutes() as f64 / 60.0
    }
}
