use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;

pub mod error;
pub mod google_csv;
pub mod ics;
pub mod infoboard;
pub mod models;
pub mod server;

pub use error::{Error, Result};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Google Calendar CSV import file
    #[default]
    Csv,
    /// iCalendar file
    Ics,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Ics => "ics",
        }
    }
}

/// Fetch events from the FH Kufstein infoboard and convert them to a
/// Google Calendar CSV import file.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Config {
    /// Start date (DD.MM.YYYY)
    pub start_date: String,

    /// End date (DD.MM.YYYY)
    pub end_date: String,

    /// Your PKZ
    pub pkz: String,

    /// Output file [default: calendar_import.csv, or calendar_import.ics with --format ics]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Infoboard API endpoint
    #[arg(long, env = "INFOBOARD_API_URL", default_value = infoboard::DEFAULT_API_URL)]
    pub api_url: String,
}

impl Config {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("calendar_import.{}", self.format.extension())))
    }
}

/// Fetches all events for the configured range and writes them to
/// `config.output_path()`. Returns the number of events written.
pub fn run(config: &Config) -> Result<usize> {
    info!(
        pkz = %config.pkz,
        from = %config.start_date,
        until = %config.end_date,
        "fetching events"
    );
    let events = infoboard::fetch_events(
        &config.api_url,
        &config.start_date,
        &config.end_date,
        &config.pkz,
    )?;
    info!(count = events.len(), "fetched events");

    let output = config.output_path();
    info!(output = %output.display(), format = ?config.format, "converting events");
    let file = File::create(&output)?;
    let written = match config.format {
        Format::Csv => google_csv::write_all(&events, file)?,
        Format::Ics => ics::write_all(&events, &ics::calendar_name(&config.pkz), file)?,
    };

    Ok(written)
}
