mod anchor;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use mayday_calendar::CalendarError;
use mayday_core::{AppError, Config, ConfigError};
use mayday_services::CompletionError;

/// Turn language-model scheduling plans into calendar events.
#[derive(Parser)]
#[command(name = "mayday", version, about)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a saved response and list its sessions
    Parse {
        /// Response file, or "-" for stdin
        input: String,

        /// Date of "Day 1" (dd/mm/yy, dd/mm/yyyy or yyyy-mm-dd)
        #[arg(long)]
        anchor: Option<String>,

        /// Also write the sessions to this .ics file
        #[arg(long)]
        ics: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the AI service to plan tasks and export the sessions
    Plan {
        /// Tasks to schedule
        #[arg(required = true)]
        tasks: Vec<String>,

        /// Date of "Day 1" (dd/mm/yy, dd/mm/yyyy or yyyy-mm-dd)
        #[arg(long)]
        anchor: Option<String>,

        /// Where the sessions go
        #[arg(long, value_enum, default_value_t = Sink::Ics)]
        sink: Sink,

        /// Output file for the ics sink
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target calendar for the google sink
        #[arg(long)]
        calendar_id: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        show_path: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sink {
    /// iCalendar file
    Ics,
    /// Google Calendar
    Google,
}

/// Short message for the terminal; the full chain goes to the log.
fn user_message(error: &anyhow::Error) -> String {
    if let Some(e) = error.downcast_ref::<AppError>() {
        e.user_message().to_string()
    } else if let Some(e) = error.downcast_ref::<ConfigError>() {
        e.user_message().to_string()
    } else if let Some(e) = error.downcast_ref::<CompletionError>() {
        e.user_message()
    } else if let Some(e) = error.downcast_ref::<CalendarError>() {
        e.user_message()
    } else {
        error.to_string()
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse {
            input,
            anchor,
            ics,
            json,
        } => {
            let (config, _) = Config::load_validated()?;
            commands::parse(&config, &input, anchor.as_deref(), ics.as_deref(), json)
        }
        Commands::Plan {
            tasks,
            anchor,
            sink,
            output,
            calendar_id,
        } => {
            let (config, _) = Config::load_validated()?;
            commands::plan(
                &config,
                &tasks,
                anchor.as_deref(),
                sink,
                output.as_deref(),
                calendar_id.as_deref(),
            )
            .await
        }
        Commands::Config { show_path } => commands::show_config(show_path),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = mayday_core::init(cli.verbose) {
        eprintln!("{}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plan_defaults_to_ics_sink() {
        let cli = Cli::parse_from(["mayday", "plan", "learn algebra"]);
        match cli.command {
            Commands::Plan { tasks, sink, .. } => {
                assert_eq!(tasks, vec!["learn algebra".to_string()]);
                assert_eq!(sink, Sink::Ics);
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_plan_requires_a_task() {
        assert!(Cli::try_parse_from(["mayday", "plan"]).is_err());
    }

    #[test]
    fn test_user_message_prefers_typed_errors() {
        let err = anyhow::Error::from(AppError::EmptySchedule);
        assert!(user_message(&err).contains("Nothing was scheduled"));

        let err = anyhow::Error::from(CompletionError::MissingApiKey);
        assert!(user_message(&err).contains("OPENAI_API_KEY"));

        let err = anyhow::anyhow!("plain failure");
        assert_eq!(user_message(&err), "plain failure");
    }
}
