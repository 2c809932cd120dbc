//! Argument handling and output formatting for the `earthquake` command.
//!
//! Usage: `earthquake <min_magnitude>`

use crate::domain::EarthquakeRecord;
use crate::gateway::parse_threshold;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;

pub const USAGE: &str = "usage: earthquake min_magnitude";

/// List earthquakes at or above a minimum magnitude, largest first
#[derive(Parser, Debug)]
#[command(name = "earthquake", version, allow_negative_numbers = true)]
pub struct Cli {
    /// Minimum magnitude (inclusive)
    #[arg(value_parser = parse_magnitude_arg)]
    pub min_magnitude: f64,
}

/// What the binary should do after looking at its arguments.
#[derive(Debug)]
pub enum Invocation {
    Run(Cli),
    /// `--help` or `--version`: print the text and exit 0.
    Info(String),
    /// Bad arguments: print the usage line and exit 1.
    Usage,
}

fn parse_magnitude_arg(raw: &str) -> Result<f64, String> {
    parse_threshold(raw).ok_or_else(|| format!("{raw:?} is not a number"))
}

/// Interpret `args` (including the program name) without touching the database.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Run(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(e.to_string())
        }
        Err(_) => Invocation::Usage,
    }
}

pub fn header(min_magnitude: f64) -> String {
    format!("Earthquakes with magnitudes greater than or equal to {min_magnitude}:")
}

pub fn format_record(record: &EarthquakeRecord) -> String {
    format!(
        "{}: {}",
        record.name.as_deref().unwrap_or("(unnamed)"),
        record.magnitude
    )
}
