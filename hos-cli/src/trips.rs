//! Trips command implementation: lists stored trips.

use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::Parser;
use hos_core::rules::as_hours;
use hos_core::{PlannedTrip, ScheduleStore};
use hos_data::SqliteScheduleStore;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_DATABASE, ARG_FORMAT, CliError, DEFAULT_DATABASE, OutputFormat};

/// CLI arguments for the `trips` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List stored trips, newest first")]
#[ortho_config(prefix = "HOS")]
pub(crate) struct TripsArgs {
    /// Path to the SQLite trip database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl TripsArgs {
    pub(crate) fn into_config(self) -> Result<TripsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(TripsConfig::from(merged))
    }
}

/// Resolved `trips` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TripsConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) format: OutputFormat,
}

impl From<TripsArgs> for TripsConfig {
    fn from(args: TripsArgs) -> Self {
        Self {
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            format: args.format.unwrap_or_default(),
        }
    }
}

pub(super) fn run_trips(args: TripsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_trips_with(args, &mut stdout)
}

pub(super) fn run_trips_with(args: TripsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store =
        SqliteScheduleStore::open(&config.database).map_err(|source| CliError::OpenStore {
            path: config.database.clone(),
            source,
        })?;
    let trips = store.trips().map_err(CliError::QueryStore)?;
    match config.format {
        OutputFormat::Text => write_trips_text(writer, &trips).map_err(CliError::WriteOutput),
        OutputFormat::Json => {
            let payload =
                serde_json::to_string_pretty(&trips).map_err(CliError::SerialiseOutput)?;
            writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
        }
    }
}

fn write_trips_text(writer: &mut dyn Write, trips: &[PlannedTrip]) -> io::Result<()> {
    if trips.is_empty() {
        return writeln!(writer, "No trips planned yet.");
    }
    for trip in trips {
        writeln!(
            writer,
            "{}  {}  {} -> {} -> {}  {:.1} mi  {:.1} h",
            trip.id,
            trip.created_at.format("%Y-%m-%d %H:%M"),
            trip.current_location,
            trip.pickup_location,
            trip.dropoff_location,
            trip.total_distance,
            as_hours(trip.drive_time()),
        )?;
    }
    Ok(())
}
