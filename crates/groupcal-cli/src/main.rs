//! `groupcal` CLI — expand recurring schedules and compute availability from
//! the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Expand a recurring schedule into concrete occurrences (stdin → stdout)
//! groupcal expand -i schedule.json
//!
//! # Free/busy for one user's calendar
//! cat busy.json | groupcal free-busy
//!
//! # Time slots when every listed user is free, at least an hour long
//! groupcal common-free -i group.json --min-minutes 60
//! ```
//!
//! All inputs and outputs are the engine's canonical camelCase JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::{self, Read};

use groupcal_engine::{
    common_free_time, compute_free_busy, expand, BusyInterval, EventTemplate, EventTemplateSpec,
    OverrideSet, RecurrenceRule, RecurrenceRuleSpec, RecurringSchedule, UserBusy,
};

#[derive(Parser)]
#[command(
    name = "groupcal",
    version,
    about = "Recurrence expansion and free/busy computation for shared calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a recurring schedule into concrete occurrences
    Expand {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compute free and busy intervals for one user's calendar
    FreeBusy {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Find time slots when every listed user is free
    CommonFree {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Only report slots of at least this many minutes
        #[arg(long)]
        min_minutes: Option<i64>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandRequest {
    #[serde(default = "default_rule_id")]
    id: String,
    rule: RecurrenceRuleSpec,
    template: EventTemplateSpec,
    window_start: NaiveDate,
    window_end: NaiveDate,
    #[serde(default)]
    cancelled_dates: Vec<NaiveDate>,
}

fn default_rule_id() -> String {
    "series".to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest {
    busy: Vec<BusyInterval>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommonFreeRequest {
    users: Vec<UserBusy>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand { input, output } => {
            let json = read_input(input.as_deref())?;
            let request: ExpandRequest =
                serde_json::from_str(&json).context("Failed to parse expand request")?;

            let rule = RecurrenceRule::try_from(request.rule)
                .context("Invalid recurrence rule")?;
            let template = EventTemplate::try_from(request.template)
                .context("Invalid event template")?;
            let schedule = RecurringSchedule {
                id: request.id,
                rule,
                template,
            };

            let mut overrides = OverrideSet::new();
            for date in request.cancelled_dates {
                overrides.cancel(date);
            }

            let occurrences = expand(
                &schedule,
                request.window_start,
                request.window_end,
                &overrides,
            )
            .context("Expansion failed")?;

            write_output(output.as_deref(), &serde_json::to_string_pretty(&occurrences)?)?;
        }
        Commands::FreeBusy { input, output } => {
            let json = read_input(input.as_deref())?;
            let request: FreeBusyRequest =
                serde_json::from_str(&json).context("Failed to parse free-busy request")?;

            let result =
                compute_free_busy(&request.busy, request.window_start, request.window_end);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&result)?)?;
        }
        Commands::CommonFree {
            input,
            output,
            min_minutes,
        } => {
            let json = read_input(input.as_deref())?;
            let request: CommonFreeRequest =
                serde_json::from_str(&json).context("Failed to parse common-free request")?;

            let common =
                common_free_time(&request.users, request.window_start, request.window_end);
            let slots: Vec<_> = common
                .into_vec()
                .into_iter()
                .filter(|slot| {
                    min_minutes.is_none_or(|min| slot.duration_minutes() >= min)
                })
                .collect();

            write_output(output.as_deref(), &serde_json::to_string_pretty(&slots)?)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
