//! `period` CLI: relations, gaps, shifts, chains and relative time from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Relation of B to A
//! period relation 2026-01-01T10:00:00Z/2026-01-01T12:00:00Z 2026-01-01T11:00:00Z/2026-01-01T13:00:00Z
//!
//! # Gap between two periods, in seconds
//! period gap 2026-01-01T10:00:00Z/2026-01-01T11:00:00Z 2026-01-01T12:00:00Z/2026-01-01T13:00:00Z
//!
//! # Whole days in a period, in a local timezone
//! period --timezone America/New_York duration 2026-03-07T12:00:00-05:00/2026-03-09T12:00:00-04:00 --unit day
//!
//! # Shift a period one month later
//! period shift 2026-01-31T09:00:00Z/2026-01-31T10:00:00Z --size month
//!
//! # Relative time
//! period ago 2026-03-09T10:00:00Z --since 2026-03-10T12:00:00Z
//!
//! # Link a JSON array of {start,end} into a contiguous chain
//! period chain -i periods.json
//!
//! # Sort a JSON array of periods and report its bounds
//! period collection -i periods.json --sort start-asc
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use period_engine::{
    time_ago, CalendarConfig, DateAgoFormat, DstPolicy, GregorianCalendar, Instant,
    SharedCalendar, TimePeriod, TimePeriodChain, TimePeriodCollection, TimePeriodGroup,
    TimePeriodSize,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "period", version, about = "Time-period algebra CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// IANA timezone for calendar arithmetic (overrides the config file)
    #[arg(long, global = true, env = "PERIOD_TIMEZONE")]
    timezone: Option<String>,

    /// How to resolve local times inside a DST gap: shift-forward or reject
    #[arg(long, global = true, env = "PERIOD_DST_POLICY")]
    dst_policy: Option<DstPolicy>,

    /// JSON file holding a calendar configuration
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the relation of period B to period A
    Relation {
        /// Reference period (START/END)
        a: String,
        /// Period to classify (START/END)
        b: String,
    },
    /// Print the gap between two periods in seconds
    Gap { a: String, b: String },
    /// Print the whole number of units in a period
    Duration {
        period: String,
        /// Unit to count (second, minute, hour, day, week, month, year)
        #[arg(long, default_value = "second")]
        unit: TimePeriodSize,
    },
    /// Move a period earlier or later, keeping its duration
    Shift {
        period: String,
        /// Unit of the shift
        #[arg(long)]
        size: TimePeriodSize,
        /// Number of units
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        amount: i64,
        /// Shift toward the past instead of the future
        #[arg(long)]
        earlier: bool,
    },
    /// Describe how long ago an instant was
    Ago {
        /// RFC 3339 instant
        date: String,
        /// Reference instant (defaults to now)
        #[arg(long)]
        since: Option<String>,
        /// long, long-numeric-dates-and-times, long-numeric-dates, long-numeric-times, short, week
        #[arg(long, default_value = "long")]
        format: DateAgoFormat,
    },
    /// Append a JSON array of periods to a chain and print the linked result
    Chain {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Load a JSON array of periods into a collection and print its bounds
    Collection {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Sort order applied before printing
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    StartAsc,
    StartDesc,
    EndAsc,
    EndDesc,
    DurationAsc,
    DurationDesc,
}

/// JSON form of a single period.
#[derive(Serialize, Deserialize)]
struct PeriodJson {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl From<&TimePeriod> for PeriodJson {
    fn from(period: &TimePeriod) -> Self {
        PeriodJson {
            start: period.start,
            end: period.end,
        }
    }
}

/// JSON form of a chain or collection.
#[derive(Serialize)]
struct GroupJson {
    start: Option<Instant>,
    end: Option<Instant>,
    duration_seconds: i64,
    periods: Vec<PeriodJson>,
}

impl GroupJson {
    fn of<G: TimePeriodGroup>(group: &G) -> Self {
        GroupJson {
            start: group.start(),
            end: group.end(),
            duration_seconds: group.duration_in_seconds(),
            periods: group.iter().map(PeriodJson::from).collect(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let calendar = build_calendar(&cli)?;
    debug!(
        timezone = %calendar.timezone(),
        dst_policy = %calendar.dst_policy(),
        "calendar configured"
    );

    match cli.command {
        Commands::Relation { a, b } => {
            let shared = calendar.shared();
            let a = parse_period(&a, &shared)?;
            let b = parse_period(&b, &shared)?;
            println!("{}", a.relation_to(&b));
        }
        Commands::Gap { a, b } => {
            let shared = calendar.shared();
            let a = parse_period(&a, &shared)?;
            let b = parse_period(&b, &shared)?;
            println!("{}", a.gap_between(&b).num_seconds());
        }
        Commands::Duration { period, unit } => {
            let period = parse_period(&period, &calendar.shared())?;
            println!("{}", period.duration_in(unit));
        }
        Commands::Shift {
            period,
            size,
            amount,
            earlier,
        } => {
            let mut period = parse_period(&period, &calendar.shared())?;
            let shifted = if earlier {
                period.shift_earlier(size, amount)
            } else {
                period.shift_later(size, amount)
            };
            shifted.with_context(|| format!("Failed to shift {} by {} {}", period, amount, size))?;
            println!("{}", period);
        }
        Commands::Ago {
            date,
            since,
            format,
        } => {
            let date = parse_instant(&date)?;
            let since = match since {
                Some(since) => parse_instant(&since)?,
                None => Utc::now(),
            };
            println!("{}", time_ago(&calendar, date, since, format));
        }
        Commands::Chain { input, output } => {
            let shared = calendar.shared();
            let periods = read_periods(input.as_deref(), &shared)?;
            let mut chain = TimePeriodChain::new(shared);
            for period in periods {
                chain
                    .add(period)
                    .context("Failed to append period to chain")?;
            }
            let json = serde_json::to_string_pretty(&GroupJson::of(&chain))?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Collection {
            input,
            output,
            sort,
        } => {
            let shared = calendar.shared();
            let periods = read_periods(input.as_deref(), &shared)?;
            let mut collection = TimePeriodCollection::new(shared);
            collection.extend(periods);
            match sort {
                Some(SortKey::StartAsc) => collection.sort_by_start_ascending(),
                Some(SortKey::StartDesc) => collection.sort_by_start_descending(),
                Some(SortKey::EndAsc) => collection.sort_by_end_ascending(),
                Some(SortKey::EndDesc) => collection.sort_by_end_descending(),
                Some(SortKey::DurationAsc) => collection.sort_by_duration_ascending(),
                Some(SortKey::DurationDesc) => collection.sort_by_duration_descending(),
                None => {}
            }
            let json = serde_json::to_string_pretty(&GroupJson::of(&collection))?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

/// Resolve the calendar from `--config`, then apply `--timezone` and `--dst-policy`.
fn build_calendar(cli: &Cli) -> Result<GregorianCalendar> {
    let mut config = match cli.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            serde_json::from_str::<CalendarConfig>(&raw)
                .with_context(|| format!("Invalid calendar config: {}", path))?
        }
        None => CalendarConfig::default(),
    };

    if let Some(timezone) = &cli.timezone {
        config.timezone = timezone.clone();
    }
    if let Some(policy) = cli.dst_policy {
        config.dst_policy = policy;
    }

    Ok(GregorianCalendar::from_config(&config)?)
}

fn parse_instant(raw: &str) -> Result<Instant> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid RFC 3339 instant: '{}'", raw))
}

/// Parse `START/END` into a period.
fn parse_period(raw: &str, calendar: &SharedCalendar) -> Result<TimePeriod> {
    let (start, end) = raw
        .split_once('/')
        .with_context(|| format!("Invalid period '{}': expected START/END", raw))?;
    Ok(TimePeriod::new(
        parse_instant(start)?,
        parse_instant(end)?,
        calendar.clone(),
    ))
}

fn read_periods(path: Option<&str>, calendar: &SharedCalendar) -> Result<Vec<TimePeriod>> {
    let raw = read_input(path)?;
    let periods: Vec<PeriodJson> =
        serde_json::from_str(&raw).context("Expected a JSON array of {start, end} objects")?;
    Ok(periods
        .into_iter()
        .map(|p| TimePeriod::new(p.start, p.end, calendar.clone()))
        .collect())
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
