//! Reading the date that stands for "Day 1" of a plan.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use mayday_core::AppError;

/// Accepted input formats, tried in order.
const ANCHOR_FORMATS: [&str; 3] = ["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d"];

/// Parse an anchor date. Empty input means `today`.
pub fn parse_anchor(input: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today);
    }

    ANCHOR_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .ok_or_else(|| AppError::InvalidAnchorDate(input.to_string()))
}

/// Ask for an anchor date until a valid one is entered.
///
/// End of input falls back to `today`.
pub fn prompt_anchor<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    today: NaiveDate,
) -> std::io::Result<NaiveDate> {
    loop {
        write!(
            output,
            "Enter the start date (dd/mm/yy) or press Enter for today: "
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            tracing::warn!("No start date entered, using {}", today);
            return Ok(today);
        }

        match parse_anchor(&line, today) {
            Ok(date) => return Ok(date),
            Err(e) => writeln!(output, "{}", e.user_message())?,
        }
    }
}
