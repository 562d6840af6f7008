//! Collects the parser's output into an ordered, inspectable result.

use chrono::Duration;
use serde::Serialize;

use crate::diagnostic::{Diagnostic, Severity};
use crate::plan::PlanItem;
use crate::types::{PlanKind, ScheduledEvent};

/// Everything one parse produced.
///
/// Events keep encounter order; identical sessions are all kept since the
/// same task may legitimately recur.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub plan_kind: Option<PlanKind>,
    pub analysis: Option<String>,
    pub events: Vec<ScheduledEvent>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScheduleReport {
    /// Drain a stream of plan items on top of response-level diagnostics.
    pub fn collect(
        plan_kind: Option<PlanKind>,
        analysis: Option<String>,
        mut diagnostics: Vec<Diagnostic>,
        items: impl IntoIterator<Item = PlanItem>,
    ) -> Self {
        let mut events = Vec::new();
        for item in items {
            match item {
                PlanItem::Event(event) => events.push(event),
                PlanItem::Diagnostic(diagnostic) => {
                    tracing::debug!("Plan diagnostic: {}", diagnostic);
                    diagnostics.push(diagnostic);
                }
            }
        }

        Self {
            plan_kind,
            analysis,
            events,
            diagnostics,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether any diagnostic is error-level (the response was unusable).
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// Events paired with their display duration.
    pub fn sessions(&self) -> impl Iterator<Item = (&ScheduledEvent, Duration)> {
        self.events.iter().map(|e| (e, e.duration()))
    }

    pub fn total_duration(&self) -> Duration {
        self.events
            .iter()
            .fold(Duration::zero(), |acc, e| acc + e.duration())
    }

    pub fn into_events(self) -> Vec<ScheduledEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use chrono::{TimeZone, Utc};

    fn event(name: &str, h1: u32, h2: u32) -> ScheduledEvent {
        ScheduledEvent::new(
            name,
            Utc.with_ymd_and_hms(2024, 3, 15, h1, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, h2, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_collect_keeps_order_and_duplicates() {
        let items = vec![
            PlanItem::Event(event("B", 9, 10)),
            PlanItem::Diagnostic(Diagnostic::at_line(DiagnosticKind::OrphanTimeMarker, 2, "x")),
            PlanItem::Event(event("A", 8, 9)),
            PlanItem::Event(event("A", 8, 9)),
        ];
        let report = ScheduleReport::collect(Some(PlanKind::SingleDay), None, Vec::new(), items);

        assert_eq!(report.len(), 3);
        assert_eq!(report.events[0].name, "B");
        assert_eq!(report.events[1], report.events[2]);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_response_diagnostics_come_first() {
        let pre = vec![Diagnostic::response(DiagnosticKind::MissingFlagLine, "no flag")];
        let items = vec![PlanItem::Diagnostic(Diagnostic::at_line(
            DiagnosticKind::MalformedDayMarker,
            1,
            "bad",
        ))];
        let report = ScheduleReport::collect(None, None, pre, items);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::MissingFlagLine);
        assert_eq!(report.diagnostics[1].kind, DiagnosticKind::MalformedDayMarker);
    }

    #[test]
    fn test_durations() {
        let items = vec![PlanItem::Event(event("A", 9, 11)), PlanItem::Event(event("B", 13, 14))];
        let report = ScheduleReport::collect(None, None, Vec::new(), items);

        let durations: Vec<_> = report.sessions().map(|(_, d)| d.num_hours()).collect();
        assert_eq!(durations, vec![2, 1]);
        assert_eq!(report.total_duration(), Duration::hours(3));
    }

    #[test]
    fn test_empty_report() {
        let report = ScheduleReport::default();
        assert!(report.is_empty());
        assert!(!report.has_errors());
        assert_eq!(report.total_duration(), Duration::zero());
    }
}
