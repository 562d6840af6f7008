//! Completion-service error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Unauthorized - API key rejected")]
    Unauthorized,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no completion")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl CompletionError {
    /// User-friendly error message for terminal output.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => "Set OPENAI_API_KEY or completion.api_key in the config".to_string(),
            Self::Unauthorized => "The AI service rejected the API key. Check your settings.".to_string(),
            Self::RateLimited(secs) => format!("Too many requests. Please wait {} seconds.", secs),
            Self::Api { status, .. } if *status >= 500 => {
                "The AI service is experiencing issues. Please try again later.".to_string()
            }
            Self::Api { .. } => "The AI service refused the request.".to_string(),
            Self::EmptyResponse | Self::InvalidResponse(_) => {
                "Invalid response format from AI. Please try again.".to_string()
            }
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether trying the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::Network(_) | Self::EmptyResponse => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        assert!(CompletionError::MissingApiKey.user_message().contains("OPENAI_API_KEY"));
        assert!(CompletionError::RateLimited(30).user_message().contains("30"));
        let err = CompletionError::Api { status: 503, message: "down".into() };
        assert!(err.user_message().contains("try again later"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(CompletionError::RateLimited(10).is_retryable());
        assert!(CompletionError::Api { status: 502, message: String::new() }.is_retryable());
        assert!(!CompletionError::Api { status: 400, message: String::new() }.is_retryable());
        assert!(!CompletionError::Unauthorized.is_retryable());
    }
}
