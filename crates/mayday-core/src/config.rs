use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Text-completion provider settings
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Calendar sink settings
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Schedule display settings
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_completion_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// API key (optional, falls back to OPENAI_API_KEY)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_completion_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_completion_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl CompletionConfig {
    /// Configured key, or the OPENAI_API_KEY environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Base URL of the Google Calendar v3 API
    #[serde(default = "default_calendar_api_url")]
    pub api_url: String,

    /// Calendar that receives inserted events
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    /// OAuth access token (optional, falls back to GOOGLE_ACCESS_TOKEN)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Default output file for the ICS sink
    #[serde(default = "default_ics_filename")]
    pub ics_filename: String,
}

fn default_calendar_api_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_ics_filename() -> String {
    "my_schedule.ics".to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api_url: default_calendar_api_url(),
            calendar_id: default_calendar_id(),
            access_token: None,
            ics_filename: default_ics_filename(),
        }
    }
}

impl CalendarConfig {
    /// Configured token, or the GOOGLE_ACCESS_TOKEN environment variable.
    pub fn resolve_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var("GOOGLE_ACCESS_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// strftime format used when listing session dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    "%d/%m/%y".to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.completion.api_url, "completion.api_url", &mut result);
        self.validate_url(&self.calendar.api_url, "calendar.api_url", &mut result);

        if self.completion.model.trim().is_empty() {
            result.add_error("completion.model", "Model name must not be empty");
        }

        if !(0.0..=2.0).contains(&self.completion.temperature) {
            result.add_error(
                "completion.temperature",
                "Temperature must be between 0.0 and 2.0",
            );
        }

        if self.completion.max_tokens == 0 {
            result.add_error("completion.max_tokens", "max_tokens must be greater than 0");
        } else if self.completion.max_tokens < 200 {
            result.add_warning(
                "completion.max_tokens",
                "max_tokens below 200 may truncate multi-day plans",
            );
        }

        if self.completion.timeout_secs == 0 {
            result.add_error("completion.timeout_secs", "Timeout must be greater than 0");
        }

        if self.completion.resolve_api_key().is_none() {
            result.add_warning(
                "completion.api_key",
                "No API key configured and OPENAI_API_KEY is unset - planning will be unavailable",
            );
        }

        if self.calendar.calendar_id.trim().is_empty() {
            result.add_error("calendar.calendar_id", "Calendar ID must not be empty");
        }

        if self.calendar.resolve_access_token().is_none() {
            result.add_warning(
                "calendar.access_token",
                "No access token configured and GOOGLE_ACCESS_TOKEN is unset - Google Calendar sink unavailable",
            );
        }

        if self.calendar.ics_filename.trim().is_empty() {
            result.add_error("calendar.ics_filename", "ICS filename must not be empty");
        } else if !self.calendar.ics_filename.ends_with(".ics") {
            result.add_warning(
                "calendar.ics_filename",
                "ICS filename does not end with .ics",
            );
        }

        if StrftimeItems::new(&self.schedule.date_format).any(|item| matches!(item, Item::Error)) {
            result.add_error(
                "schedule.date_format",
                format!("Invalid date format: {}", self.schedule.date_format),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("mayday");

        Ok(config_dir.join("config.toml"))
    }
}
