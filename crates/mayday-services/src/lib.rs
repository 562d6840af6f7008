//! Text-completion provider for Mayday.
//!
//! Sends a task description plus the scheduling instructions to an
//! OpenAI-compatible chat endpoint and returns the raw answer.

pub mod completion;
pub mod error;
pub mod prompt;
pub mod retry;

pub use completion::{CompletionClient, CompletionOptions};
pub use error::CompletionError;
pub use prompt::{looks_like_schedule, schedule_request, SCHEDULING_INSTRUCTIONS};
pub use retry::RetryConfig;
