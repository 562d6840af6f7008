//! Schedule-response parsing for Mayday.
//!
//! Turns a language model's free-form scheduling answer into resolved
//! calendar events:
//!
//! ```text
//! raw text -> classify -> split_sections -> PlanLines -> ScheduleReport
//! ```
//!
//! Every stage is pure and synchronous. Malformed input never aborts a
//! parse; it degrades to a skipped line plus a [`Diagnostic`].

pub mod classify;
pub mod diagnostic;
pub mod plan;
pub mod report;
pub mod resolve;
pub mod sections;
pub mod types;

pub use classify::{classify, Classification};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use plan::{classify_line, step, LineKind, ParseContext, PlanItem, PlanLines};
pub use report::ScheduleReport;
pub use resolve::{parse_clock, resolve_day, resolve_instant};
pub use sections::{split_sections, SectionError, Sections};
pub use types::{PlanKind, ScheduledEvent};

use chrono::NaiveDate;

/// Parse a complete response against the date that stands for "Day 1".
pub fn parse_schedule(raw: &str, anchor: NaiveDate) -> ScheduleReport {
    let classification = classify(raw);
    let mut diagnostics = Vec::new();

    if classification.kind.is_none() {
        diagnostics.push(Diagnostic::response(
            DiagnosticKind::MissingFlagLine,
            "first line is neither \"yes\" nor \"no\"; plan kind unknown",
        ));
    }

    let sections = match split_sections(classification.body(raw)) {
        Ok(sections) => sections,
        Err(e) => {
            tracing::warn!("Unexpected response format: {}", e);
            diagnostics.push(Diagnostic::response(
                DiagnosticKind::MalformedResponse,
                e.to_string(),
            ));
            return ScheduleReport {
                plan_kind: classification.kind,
                analysis: None,
                events: Vec::new(),
                diagnostics,
            };
        }
    };

    let report = ScheduleReport::collect(
        classification.kind,
        Some(sections.analysis.to_string()),
        diagnostics,
        PlanLines::new(sections.plan, anchor),
    );

    tracing::info!(
        "Parsed schedule: {} events, {} diagnostics (anchor {})",
        report.len(),
        report.diagnostics.len(),
        anchor
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unflagged_response_still_parses() {
        let raw = "Task Analysis:\nquick\nScheduling Plan:\nRun: 1 hour\nDay: 1\nTime: 07:00 - 08:00";
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let report = parse_schedule(raw, anchor);

        assert_eq!(report.plan_kind, None);
        assert_eq!(report.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::MissingFlagLine);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_malformed_response_has_no_events() {
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let report = parse_schedule("No\nI cannot help with that.", anchor);

        assert_eq!(report.plan_kind, Some(PlanKind::SingleDay));
        assert!(report.is_empty());
        assert!(report.has_errors());
        assert_eq!(report.analysis, None);
    }
}
