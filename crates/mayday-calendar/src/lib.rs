//! Calendar sinks for Mayday.
//!
//! Provides the Google Calendar insert client and iCalendar file output.

pub mod client;
pub mod error;
pub mod ics;
pub mod types;

pub use client::CalendarClient;
pub use error::CalendarError;
pub use ics::{render_calendar, write_calendar, DEFAULT_ICS_FILENAME};
pub use types::{Event, EventStatus, InsertFailure, InsertSummary};
