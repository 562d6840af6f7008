//! Subcommand implementations.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use mayday_calendar::{write_calendar, CalendarClient, CalendarError};
use mayday_core::{AppError, Config};
use mayday_schedule::{classify, parse_schedule, PlanKind, ScheduleReport, ScheduledEvent};
use mayday_services::{looks_like_schedule, CompletionClient, CompletionError, CompletionOptions};

use crate::anchor::{parse_anchor, prompt_anchor};
use crate::output;
use crate::Sink;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve "Day 1": explicit flag first, then an interactive prompt when the
/// plan needs one, otherwise today.
fn resolve_anchor(explicit: Option<&str>, needs_anchor: bool, can_prompt: bool) -> Result<NaiveDate> {
    if let Some(text) = explicit {
        return Ok(parse_anchor(text, today())?);
    }

    if needs_anchor {
        if can_prompt {
            let stdin = std::io::stdin();
            let anchor = prompt_anchor(stdin.lock(), std::io::stdout(), today())
                .context("Failed to read start date")?;
            return Ok(anchor);
        }
        tracing::warn!("Plan needs a start date but none was given; using today");
    }

    Ok(today())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read response from stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

fn write_ics(path: &Path, events: &[ScheduledEvent]) -> Result<()> {
    if events.is_empty() {
        return Err(AppError::EmptySchedule.into());
    }
    let written = write_calendar(path, events)?;
    println!("Calendar file created: {}", written.display());
    Ok(())
}

/// `mayday parse`: parse a saved response.
pub fn parse(
    config: &Config,
    input: &str,
    anchor: Option<&str>,
    ics: Option<&Path>,
    json: bool,
) -> Result<()> {
    let raw = read_input(input)?;

    let kind = classify(&raw).kind;
    let can_prompt = input != "-" && std::io::stdin().is_terminal();
    let anchor = resolve_anchor(anchor, PlanKind::needs_anchor(kind), can_prompt)?;

    let report = parse_schedule(&raw, anchor);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print!("{}", output::format_report(&report, &config.schedule.date_format));
    }

    if let Some(path) = ics {
        write_ics(path, &report.events)?;
    }

    Ok(())
}

async fn request_all(client: &CompletionClient, tasks: &[String]) -> Result<Vec<String>> {
    let mut responses = Vec::with_capacity(tasks.len());
    for task in tasks {
        println!("Planning: {}", task);
        let text = client.request_schedule(task).await?;
        if !looks_like_schedule(&text) {
            tracing::warn!("Response for '{}' does not look like a scheduling plan", task);
        }
        responses.push(text);
    }
    Ok(responses)
}

/// `mayday plan`: ask the completion service for plans and hand the merged
/// sessions to a sink.
pub async fn plan(
    config: &Config,
    tasks: &[String],
    anchor: Option<&str>,
    sink: Sink,
    output_path: Option<&Path>,
    calendar_id: Option<&str>,
) -> Result<()> {
    let api_key = config
        .completion
        .resolve_api_key()
        .ok_or(CompletionError::MissingApiKey)?;

    let options = CompletionOptions {
        model: config.completion.model.clone(),
        temperature: config.completion.temperature,
        max_tokens: config.completion.max_tokens,
        timeout: Duration::from_secs(config.completion.timeout_secs),
    };
    let client = CompletionClient::new_with_base_url(&api_key, &config.completion.api_url, options)?;

    let responses = request_all(&client, tasks).await?;

    let needs_anchor = responses
        .iter()
        .any(|raw| PlanKind::needs_anchor(classify(raw).kind));
    let anchor = resolve_anchor(anchor, needs_anchor, std::io::stdin().is_terminal())?;

    let mut events = Vec::new();
    for (task, raw) in tasks.iter().zip(&responses) {
        let report: ScheduleReport = parse_schedule(raw, anchor);
        println!("\n=== {} ===", task);
        print!("{}", output::format_report(&report, &config.schedule.date_format));
        events.extend(report.into_events());
    }

    if events.is_empty() {
        return Err(AppError::EmptySchedule.into());
    }

    match sink {
        Sink::Ics => {
            let path = output_path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(&config.calendar.ics_filename));
            write_ics(&path, &events)
        }
        Sink::Google => {
            let token = config
                .calendar
                .resolve_access_token()
                .ok_or(CalendarError::AuthRequired)?;
            let calendar_id = calendar_id.unwrap_or(&config.calendar.calendar_id);
            let client = CalendarClient::new_with_base_url(&token, &config.calendar.api_url);

            let summary = client.insert_events(calendar_id, &events).await;
            print!("{}", output::format_insert_summary(&summary));

            if summary.inserted.is_empty() {
                return Err(AppError::Calendar(format!(
                    "all {} inserts into '{}' failed",
                    summary.failures.len(),
                    calendar_id
                ))
                .into());
            }
            Ok(())
        }
    }
}

/// `mayday config`: show the effective configuration.
pub fn show_config(show_path: bool) -> Result<()> {
    let path = Config::config_path()?;
    if show_path {
        println!("{}", path.display());
        return Ok(());
    }

    let config = Config::load()?;
    let validation = config.validate();
    println!("# {}", path.display());
    print!("{}", output::format_config(&config, &validation));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_anchor_wins() {
        let anchor = resolve_anchor(Some("15/03/24"), true, false).unwrap();
        assert_eq!(anchor, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_invalid_explicit_anchor_is_app_error() {
        let err = resolve_anchor(Some("someday"), false, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::InvalidAnchorDate(_))
        ));
    }

    #[test]
    fn test_anchor_defaults_to_today_without_prompt() {
        assert_eq!(resolve_anchor(None, true, false).unwrap(), today());
        assert_eq!(resolve_anchor(None, false, true).unwrap(), today());
    }

    #[test]
    fn test_write_ics_refuses_empty_schedule() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.ics");

        let err = write_ics(&path, &[]).unwrap_err();

        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::EmptySchedule)));
        assert!(!path.exists());
    }

    #[test]
    fn test_parse_writes_ics() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("response.txt");
        let ics = temp_dir.path().join("out.ics");
        std::fs::write(
            &input,
            "No\nTask Analysis:\nQuick.\nScheduling Plan:\nLaundry: 1 hours\nDay: 1\nTime: 10:00 - 11:00\n",
        )
        .unwrap();

        let input = input.to_string_lossy().to_string();
        parse(&Config::default(), &input, Some("15/03/24"), Some(&ics), false).unwrap();

        let contents = std::fs::read_to_string(&ics).unwrap();
        assert!(contents.contains("SUMMARY:Laundry"));
        assert!(contents.contains("DTSTART:20240315T100000Z"));
    }
}
