//! Terminal rendering of schedules, diagnostics and configuration.

use chrono::Duration;
use mayday_calendar::InsertSummary;
use mayday_core::{Config, ValidationResult};
use mayday_schedule::{PlanKind, ScheduleReport, ScheduledEvent, Severity};

/// One session in the listing layout:
///
/// ```text
/// • Algebra
///   📅 15/03/24
///   🕒 09:00 - 11:00 (2.0 hours)
/// ```
pub fn format_session(event: &ScheduledEvent, duration: Duration, date_format: &str) -> String {
    format!(
        "• {}\n  📅 {}\n  🕒 {} - {} ({:.1} hours)",
        event.name,
        event.start.format(date_format),
        event.start.format("%H:%M"),
        event.end.format("%H:%M"),
        duration.num_minutes() as f64 / 60.0,
    )
}

fn plan_kind_label(kind: Option<PlanKind>) -> &'static str {
    match kind {
        Some(PlanKind::MultiDay) => "multi-day",
        Some(PlanKind::SingleDay) => "single day",
        None => "unknown",
    }
}

/// Full human-readable report for one parsed response.
pub fn format_report(report: &ScheduleReport, date_format: &str) -> String {
    let mut out = format!("Plan: {}\n", plan_kind_label(report.plan_kind));

    if let Some(analysis) = &report.analysis {
        out.push_str(&format!("\nTask Analysis:\n{}\n", analysis));
    }

    if report.is_empty() {
        out.push_str("\nNo sessions found.\n");
    } else {
        out.push_str("\nScheduled sessions:\n");
        for (event, duration) in report.sessions() {
            out.push_str(&format_session(event, duration, date_format));
            out.push('\n');
        }
        let total = report.total_duration().num_minutes() as f64 / 60.0;
        out.push_str(&format!(
            "\n{} sessions, {:.1} hours in total\n",
            report.len(),
            total
        ));
    }

    if !report.diagnostics.is_empty() {
        out.push_str("\nNotes:\n");
        for diagnostic in &report.diagnostics {
            let marker = match diagnostic.kind.severity() {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            out.push_str(&format!("  {}: {}\n", marker, diagnostic));
        }
    }

    out
}

pub fn format_insert_summary(summary: &InsertSummary) -> String {
    let mut out = format!(
        "Added {} of {} events to Google Calendar.\n",
        summary.inserted.len(),
        summary.attempted()
    );
    for failure in &summary.failures {
        out.push_str(&format!(
            "  failed #{} {}: {}\n",
            failure.index + 1,
            failure.name,
            failure.error.user_message()
        ));
    }
    out
}

fn mask(secret: &Option<String>) -> &'static str {
    match secret {
        Some(s) if !s.trim().is_empty() => "(set)",
        _ => "(not set)",
    }
}

pub fn format_config(config: &Config, validation: &ValidationResult) -> String {
    let completion = &config.completion;
    let calendar = &config.calendar;

    let mut out = format!(
        "[completion]\n  api_url     = {}\n  model       = {}\n  temperature = {}\n  max_tokens  = {}\n  timeout     = {}s\n  api_key     = {}\n",
        completion.api_url,
        completion.model,
        completion.temperature,
        completion.max_tokens,
        completion.timeout_secs,
        mask(&completion.resolve_api_key()),
    );
    out.push_str(&format!(
        "[calendar]\n  api_url      = {}\n  calendar_id  = {}\n  ics_filename = {}\n  access_token = {}\n",
        calendar.api_url,
        calendar.calendar_id,
        calendar.ics_filename,
        mask(&calendar.resolve_access_token()),
    ));
    out.push_str(&format!(
        "[schedule]\n  date_format = {}\n",
        config.schedule.date_format
    ));

    for error in &validation.errors {
        out.push_str(&format!("error: {}\n", error));
    }
    for warning in &validation.warnings {
        out.push_str(&format!("warning: {}\n", warning));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mayday_schedule::parse_schedule;

    fn algebra() -> ScheduledEvent {
        ScheduledEvent::new(
            "Algebra",
            Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, 11, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_format_session() {
        let event = algebra();
        let text = format_session(&event, event.duration(), "%d/%m/%y");
        assert_eq!(text, "• Algebra\n  📅 15/03/24\n  🕒 09:00 - 11:30 (2.5 hours)");
    }

    #[test]
    fn test_format_session_custom_date_format() {
        let event = algebra();
        let text = format_session(&event, event.duration(), "%Y-%m-%d");
        assert!(text.contains("📅 2024-03-15"));
    }

    #[test]
    fn test_format_report_lists_sessions_and_notes() {
        let raw = "Yes\nTask Analysis:\nTwo sessions.\nScheduling Plan:\nAlgebra: 4 hours\nDay: 1\nTime: 09:00 - 11:00\nDay: two\nTime: 10:00 - 12:00\n";
        let anchor = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let report = parse_schedule(raw, anchor);

        let text = format_report(&report, "%d/%m/%y");

        assert!(text.contains("Plan: multi-day"));
        assert!(text.contains("Two sessions."));
        assert!(text.contains("• Algebra"));
        assert!(text.contains("warning:"));
    }

    #[test]
    fn test_format_empty_report() {
        let text = format_report(&ScheduleReport::default(), "%d/%m/%y");
        assert!(text.contains("No sessions found."));
        assert!(text.contains("Plan: unknown"));
    }

    #[test]
    fn test_format_config_masks_secrets() {
        let mut config = Config::default();
        config.completion.api_key = Some("sk-very-secret".to_string());

        let text = format_config(&config, &ValidationResult::default());

        assert!(!text.contains("sk-very-secret"));
        assert!(text.contains("api_key     = (set)"));
    }

    #[test]
    fn test_format_insert_summary_lists_failures() {
        use mayday_calendar::{CalendarError, InsertFailure};

        let summary = InsertSummary {
            inserted: Vec::new(),
            failures: vec![InsertFailure {
                index: 1,
                name: "Geometry".to_string(),
                error: CalendarError::RateLimited(5),
            }],
        };

        let text = format_insert_summary(&summary);

        assert_eq!(
            text,
            "Added 0 of 1 events to Google Calendar.\n  failed #2 Geometry: Too many requests. Please wait 5 seconds.\n"
        );
    }

    #[test]
    fn test_format_report_lines_end_with_newline() {
        let raw = "No\nTask Analysis:\nQuick.\nScheduling Plan:\nLaundry: 1 hours\nDay: 1\nTime: 10:00 - 11:00\n";
        let anchor = chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let report = parse_schedule(raw, anchor);

        let text = format_report(&report, "%d/%m/%y");

        assert!(text.starts_with("Plan: single day\n"));
        assert!(text.contains("🕒 10:00 - 11:00 (1.0 hours)\n"));
        assert!(text.ends_with("1 sessions, 1.0 hours in total\n"));
        assert!(!text.contains("Notes:"));
    }
}
