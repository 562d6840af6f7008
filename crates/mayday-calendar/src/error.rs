//! Errors from the calendar sinks.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Calendar access denied")]
    AuthRequired,

    #[error("Access token expired or invalid")]
    TokenExpired,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Event rejected before sending: {0}")]
    InvalidEventData(String),

    #[error("Calendar API error: {0}")]
    ApiError(String),

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl CalendarError {
    /// Short message for terminal output.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRequired => {
                "Google Calendar refused access. Make sure the token has the calendar scope.".to_string()
            }
            Self::TokenExpired => {
                "Your Google access token has expired. Set a fresh GOOGLE_ACCESS_TOKEN.".to_string()
            }
            Self::RateLimited(secs) => format!("Too many requests. Please wait {} seconds.", secs),
            Self::CalendarNotFound(id) => format!("No calendar named '{}' is available", id),
            Self::InvalidEventData(msg) => format!("Skipped event: {}", msg),
            Self::ApiError(_) => "Google Calendar rejected the event.".to_string(),
            Self::FileWrite { path, .. } => format!("Could not write {}", path.display()),
            Self::NetworkError(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether a new access token would fix this error.
    pub fn should_refresh_token(&self) -> bool {
        matches!(self, Self::TokenExpired | Self::AuthRequired)
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::NetworkError(_))
    }
}
