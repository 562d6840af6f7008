//! Calendar API types and data structures.

use chrono::{DateTime, Utc};
use mayday_schedule::ScheduledEvent;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Time zone attached to every inserted event. Scheduled instants are UTC.
pub const EVENT_TIME_ZONE: &str = "UTC";

/// Event as returned by the remote calendar after insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub calendar_id: String,
    pub summary: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub status: EventStatus,
    pub html_link: Option<String>,
}

/// Event status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum EventStatus {
    #[default]
    Confirmed,
    Tentative,
    Cancelled,
}

/// One event the remote calendar refused.
#[derive(Debug)]
pub struct InsertFailure {
    /// Position of the event in the submitted list.
    pub index: usize,
    pub name: String,
    pub error: CalendarError,
}

/// Outcome of inserting a batch of events.
#[derive(Debug, Default)]
pub struct InsertSummary {
    pub inserted: Vec<Event>,
    pub failures: Vec<InsertFailure>,
}

impl InsertSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.inserted.len() + self.failures.len()
    }
}

// API Request/Response Types

/// Body of an `events.insert` request.
#[derive(Debug, Serialize)]
pub struct ApiEventRequest<'a> {
    pub summary: &'a str,
    pub start: ApiEventTime,
    pub end: ApiEventTime,
}

impl<'a> ApiEventRequest<'a> {
    pub fn from_scheduled(event: &'a ScheduledEvent) -> Self {
        Self {
            summary: &event.name,
            start: ApiEventTime::utc(event.start),
            end: ApiEventTime::utc(event.end),
        }
    }
}

/// Google Calendar API event response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start: Option<ApiEventTime>,
    pub end: Option<ApiEventTime>,
    pub status: Option<String>,
    pub html_link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl ApiEventTime {
    fn utc(instant: DateTime<Utc>) -> Self {
        Self {
            date_time: Some(instant.to_rfc3339()),
            time_zone: Some(EVENT_TIME_ZONE.to_string()),
        }
    }

    fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.date_time
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl Event {
    /// Convert API response to local Event.
    pub fn from_api(api: ApiEvent, calendar_id: &str) -> Self {
        let status = match api.status.as_deref() {
            Some("tentative") => EventStatus::Tentative,
            Some("cancelled") => EventStatus::Cancelled,
            _ => EventStatus::Confirmed,
        };

        Self {
            id: api.id,
            calendar_id: calendar_id.to_string(),
            summary: api.summary.unwrap_or_default(),
            start: api.start.as_ref().and_then(ApiEventTime::as_datetime),
            end: api.end.as_ref().and_then(ApiEventTime::as_datetime),
            status,
            html_link: api.html_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_from_api() {
        let json = r#"{
            "id": "event123",
            "summary": "Algebra",
            "start": {"dateTime": "2024-03-15T09:00:00Z", "timeZone": "UTC"},
            "end": {"dateTime": "2024-03-15T11:00:00Z", "timeZone": "UTC"},
            "status": "confirmed",
            "htmlLink": "https://calendar.google.com/event?eid=123"
        }"#;

        let api_event: ApiEvent = serde_json::from_str(json).unwrap();
        let event = Event::from_api(api_event, "primary");

        assert_eq!(event.id, "event123");
        assert_eq!(event.summary, "Algebra");
        assert_eq!(event.status, EventStatus::Confirmed);
        assert_eq!(event.start, Some(Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()));
        assert!(event.html_link.is_some());
    }

    #[test]
    fn test_event_from_sparse_api() {
        let api_event: ApiEvent = serde_json::from_str(r#"{"id": "e1", "status": "tentative"}"#).unwrap();
        let event = Event::from_api(api_event, "work");

        assert_eq!(event.calendar_id, "work");
        assert_eq!(event.summary, "");
        assert_eq!(event.start, None);
        assert_eq!(event.status, EventStatus::Tentative);
    }

    #[test]
    fn test_request_from_scheduled_event() {
        let scheduled = ScheduledEvent::new(
            "Laundry",
            Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, 11, 0, 0).unwrap(),
        );

        let body = serde_json::to_value(ApiEventRequest::from_scheduled(&scheduled)).unwrap();

        assert_eq!(body["summary"], "Laundry");
        assert_eq!(body["start"]["dateTime"], "2024-03-15T10:00:00+00:00");
        assert_eq!(body["start"]["timeZone"], "UTC");
        assert_eq!(body["end"]["timeZone"], "UTC");
    }
}
