//! Non-fatal notes about skipped or suspicious input.

use serde::Serialize;
use std::fmt;

/// What went wrong with a response or a plan line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No yes/no flag on the first non-empty line.
    MissingFlagLine,
    /// A section marker is missing or the markers are out of order.
    MalformedResponse,
    /// A `Day: ` line whose payload is not an integer.
    MalformedDayMarker,
    /// A `Time: ` line whose payload is not `HH:MM - HH:MM`.
    MalformedTimeMarker,
    /// A time range with no active task and/or day.
    OrphanTimeMarker,
    /// A day index of zero or below.
    NonPositiveDayIndex,
    /// An event whose end is not after its start.
    NonIncreasingInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::MalformedResponse => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingFlagLine => "missing-flag-line",
            Self::MalformedResponse => "malformed-response",
            Self::MalformedDayMarker => "malformed-day-marker",
            Self::MalformedTimeMarker => "malformed-time-marker",
            Self::OrphanTimeMarker => "orphan-time-marker",
            Self::NonPositiveDayIndex => "non-positive-day-index",
            Self::NonIncreasingInterval => "non-increasing-interval",
        }
    }
}

/// A caller-visible note. `line` is 1-based within the plan body and is
/// `None` for response-level problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn response(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            line: None,
            message: message.into(),
        }
    }

    pub fn at_line(kind: DiagnosticKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[{}] line {}: {}", self.kind.as_str(), line, self.message),
            None => write!(f, "[{}] {}", self.kind.as_str(), self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_malformed_response_is_an_error() {
        assert_eq!(DiagnosticKind::MalformedResponse.severity(), Severity::Error);
        assert_eq!(DiagnosticKind::OrphanTimeMarker.severity(), Severity::Warning);
        assert_eq!(DiagnosticKind::MissingFlagLine.severity(), Severity::Warning);
    }

    #[test]
    fn test_display_includes_line() {
        let diag = Diagnostic::at_line(DiagnosticKind::MalformedDayMarker, 4, "bad day");
        assert_eq!(diag.to_string(), "[malformed-day-marker] line 4: bad day");

        let diag = Diagnostic::response(DiagnosticKind::MissingFlagLine, "no flag");
        assert_eq!(diag.to_string(), "[missing-flag-line] no flag");
    }
}
