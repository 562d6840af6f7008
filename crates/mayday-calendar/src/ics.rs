//! iCalendar (.ics) output.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Event};
use mayday_schedule::ScheduledEvent;
use uuid::Uuid;

use crate::error::CalendarError;

/// File name used when the caller does not pick one.
pub const DEFAULT_ICS_FILENAME: &str = "my_schedule.ics";

const ICS_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

fn ics_datetime(instant: DateTime<Utc>) -> String {
    instant.format(ICS_DATETIME_FORMAT).to_string()
}

fn to_vevent(event: &ScheduledEvent, stamp: DateTime<Utc>) -> Event {
    let mut vevent = Event::new();
    vevent.uid(&Uuid::new_v4().to_string());
    vevent.summary(&event.name);
    vevent.timestamp(stamp);
    vevent.add_property("DTSTART", ics_datetime(event.start));
    vevent.add_property("DTEND", ics_datetime(event.end));
    vevent
}

/// Render events as one VCALENDAR, one VEVENT each, in input order.
pub fn render_calendar(events: &[ScheduledEvent]) -> String {
    let stamp = Utc::now();
    let mut calendar = Calendar::new();
    for event in events {
        calendar.push(to_vevent(event, stamp));
    }
    calendar.to_string()
}

/// Write the rendered calendar to `path`, replacing any existing file.
pub fn write_calendar(path: &Path, events: &[ScheduledEvent]) -> Result<PathBuf, CalendarError> {
    let ics = render_calendar(events);

    std::fs::write(path, ics).map_err(|source| CalendarError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} events to {}", events.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sessions() -> Vec<ScheduledEvent> {
        vec![
            ScheduledEvent::new(
                "Algebra",
                Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 15, 11, 0, 0).unwrap(),
            ),
            ScheduledEvent::new(
                "Geometry",
                Utc.with_ymd_and_hms(2024, 3, 16, 10, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 16, 12, 30, 0).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_render_one_vevent_per_event_in_order() {
        let ics = render_calendar(&sessions());

        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert_eq!(ics.matches("UID:").count(), 2);
        assert_eq!(ics.matches("DTSTAMP:").count(), 2);

        let first = ics.find("SUMMARY:Algebra").unwrap();
        let second = ics.find("SUMMARY:Geometry").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_uses_utc_basic_format() {
        let ics = render_calendar(&sessions());

        assert!(ics.contains("DTSTART:20240315T090000Z"));
        assert!(ics.contains("DTEND:20240315T110000Z"));
        assert!(ics.contains("DTSTART:20240316T100000Z"));
        assert!(ics.contains("DTEND:20240316T123000Z"));
    }

    #[test]
    fn test_render_empty_calendar() {
        let ics = render_calendar(&[]);
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_write_calendar() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_ICS_FILENAME);

        let written = write_calendar(&path, &sessions()).unwrap();

        assert_eq!(written, path);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("BEGIN:VEVENT").count(), 2);
    }

    #[test]
    fn test_write_calendar_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.ics");

        let result = write_calendar(&path, &sessions());

        assert!(matches!(result, Err(CalendarError::FileWrite { .. })));
    }
}
