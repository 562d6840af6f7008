//! Centralized error types for the Mayday application.
//!
//! Each variant carries full context for logging and maps to a short,
//! actionable `user_message()` for terminal output.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Completion service error: {0}")]
    Completion(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Invalid start date: {0}")]
    InvalidAnchorDate(String),

    #[error("No events could be scheduled")]
    EmptySchedule,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for terminal output.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Completion(_) => "Could not get a schedule from the AI service. Please try again.",
            AppError::Calendar(_) => "Could not update your calendar. Please try again.",
            AppError::InvalidAnchorDate(_) => {
                "Invalid date format! Please use dd/mm/yy (e.g., 15/03/24)."
            }
            AppError::EmptySchedule => {
                "The response did not contain any usable sessions. Nothing was scheduled."
            }
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}
