//! Google Calendar API client.

use mayday_schedule::ScheduledEvent;
use tracing::instrument;

use crate::error::CalendarError;
use crate::types::*;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct CalendarClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    pub fn new(access_token: &str) -> Self {
        Self::new_with_base_url(access_token, CALENDAR_API_BASE)
    }

    pub fn new_with_base_url(access_token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Insert one scheduled session as a timed UTC event.
    #[instrument(skip(self, event), fields(summary = %event.name), level = "info")]
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        event: &ScheduledEvent,
    ) -> Result<Event, CalendarError> {
        if event.name.trim().is_empty() {
            return Err(CalendarError::InvalidEventData("event has no name".to_string()));
        }

        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id),
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&ApiEventRequest::from_scheduled(event))
            .send()
            .await?;

        let api_event: ApiEvent = self.handle_response(response, calendar_id).await?;
        Ok(Event::from_api(api_event, calendar_id))
    }

    /// Insert every event in order, one request each.
    ///
    /// A failed insert is recorded and the remaining events are still sent.
    #[instrument(skip(self, events), fields(count = events.len()), level = "info")]
    pub async fn insert_events(&self, calendar_id: &str, events: &[ScheduledEvent]) -> InsertSummary {
        let mut summary = InsertSummary::default();

        for (index, event) in events.iter().enumerate() {
            match self.insert_event(calendar_id, event).await {
                Ok(inserted) => {
                    tracing::debug!("Inserted '{}' as {}", event.name, inserted.id);
                    summary.inserted.push(inserted);
                }
                Err(error) => {
                    tracing::warn!("Failed to insert '{}': {}", event.name, error);
                    summary.failures.push(InsertFailure {
                        index,
                        name: event.name.clone(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            "Inserted {} of {} events",
            summary.inserted.len(),
            summary.attempted()
        );
        summary
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        calendar_id: &str,
    ) -> Result<T, CalendarError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CalendarError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(CalendarError::TokenExpired)
        } else if status.as_u16() == 403 {
            Err(CalendarError::AuthRequired)
        } else if status.as_u16() == 404 {
            Err(CalendarError::CalendarNotFound(calendar_id.to_string()))
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(CalendarError::RateLimited(retry_after))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::ApiError(format!("{}: {}", status, text)))
        }
    }
}
