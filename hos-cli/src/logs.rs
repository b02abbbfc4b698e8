//! Log command implementation: prints stored daily log sheets.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use hos_core::{DailyLog, ScheduleStore, TripId};
use hos_data::SqliteScheduleStore;
use hos_render::{DailyLogSheet, LogSheetConfig};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_LOG_CARRIER_NAME, ARG_LOG_CO_DRIVER_NAME, ARG_LOG_DATE,
    ARG_LOG_DRIVER_NAME, ARG_LOG_MAIN_OFFICE_ADDRESS, ARG_LOG_TRIP_ID, ARG_LOG_VEHICLE_NUMBER,
    CliError, DEFAULT_DATABASE, ENV_LOG_TRIP_ID,
};

/// CLI arguments for the `log` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Render the stored daily logs of a trip as driver's daily \
                 log sheets: header, 24-hour duty status grid and remarks. \
                 Carrier, driver and vehicle details are taken from the \
                 options below or fall back to placeholders.",
    about = "Print the daily log sheets of a stored trip"
)]
#[ortho_config(prefix = "HOS")]
pub(crate) struct LogArgs {
    /// Trip id printed by `hos plan`.
    #[arg(value_name = ARG_LOG_TRIP_ID)]
    #[serde(default)]
    pub(crate) trip_id: Option<String>,
    /// Print only the log for this date.
    #[arg(long = ARG_LOG_DATE, value_name = "YYYY-MM-DD")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
    /// Path to the SQLite trip database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Carrier printed in the header.
    #[arg(long = ARG_LOG_CARRIER_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) carrier_name: Option<String>,
    /// Carrier's main office address.
    #[arg(long = ARG_LOG_MAIN_OFFICE_ADDRESS, value_name = "address")]
    #[serde(default)]
    pub(crate) main_office_address: Option<String>,
    /// Driver printed in the signature box.
    #[arg(long = ARG_LOG_DRIVER_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) driver_name: Option<String>,
    /// Co-driver, if any.
    #[arg(long = ARG_LOG_CO_DRIVER_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) co_driver_name: Option<String>,
    /// Truck and trailer numbers.
    #[arg(long = ARG_LOG_VEHICLE_NUMBER, value_name = "number")]
    #[serde(default)]
    pub(crate) vehicle_number: Option<String>,
}

impl LogArgs {
    pub(crate) fn into_config(self) -> Result<LogConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LogConfig::try_from(merged)
    }
}

/// Resolved `log` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogConfig {
    pub(crate) trip_id: TripId,
    pub(crate) date: Option<NaiveDate>,
    pub(crate) database: Utf8PathBuf,
    pub(crate) sheet: LogSheetConfig,
}

impl TryFrom<LogArgs> for LogConfig {
    type Error = CliError;

    fn try_from(args: LogArgs) -> Result<Self, Self::Error> {
        let raw_id = args.trip_id.ok_or(CliError::MissingArgument {
            field: ARG_LOG_TRIP_ID,
            env: ENV_LOG_TRIP_ID,
        })?;
        let trip_id = raw_id
            .trim()
            .parse::<TripId>()
            .map_err(|source| CliError::InvalidTripId {
                value: raw_id.clone(),
                source,
            })?;

        let mut sheet = LogSheetConfig::default();
        if let Some(name) = args.carrier_name {
            sheet = sheet.with_carrier_name(name);
        }
        if let Some(address) = args.main_office_address {
            sheet = sheet.with_main_office_address(address);
        }
        if let Some(name) = args.driver_name {
            sheet = sheet.with_driver_name(name);
        }
        if let Some(name) = args.co_driver_name {
            sheet = sheet.with_co_driver_name(name);
        }
        if let Some(number) = args.vehicle_number {
            sheet = sheet.with_vehicle_number(number);
        }

        Ok(Self {
            trip_id,
            date: args.date,
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            sheet,
        })
    }
}

pub(super) fn run_log(args: LogArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_log_with(args, &mut stdout)
}

pub(super) fn run_log_with(args: LogArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store =
        SqliteScheduleStore::open(&config.database).map_err(|source| CliError::OpenStore {
            path: config.database.clone(),
            source,
        })?;
    let logs = load_logs(&store, &config)?;
    write_sheets(writer, &logs, &config.sheet)
}

fn load_logs(store: &SqliteScheduleStore, config: &LogConfig) -> Result<Vec<DailyLog>, CliError> {
    let trip_id = config.trip_id;
    if store
        .trip(trip_id)
        .map_err(CliError::QueryStore)?
        .is_none()
    {
        return Err(CliError::TripNotFound { trip_id });
    }

    match config.date {
        Some(date) => store
            .daily_log(trip_id, date)
            .map_err(CliError::QueryStore)?
            .map(|log| vec![log])
            .ok_or(CliError::LogNotFound { trip_id, date }),
        None => store.daily_logs(trip_id).map_err(CliError::QueryStore),
    }
}

fn write_sheets(
    writer: &mut dyn Write,
    logs: &[DailyLog],
    sheet: &LogSheetConfig,
) -> Result<(), CliError> {
    for (index, log) in logs.iter().enumerate() {
        debug!("printing day {} ({})", log.day_number, log.date);
        if index > 0 {
            writeln!(writer).map_err(CliError::WriteOutput)?;
        }
        write!(writer, "{}", DailyLogSheet::new(log, sheet)).map_err(CliError::WriteOutput)?;
    }
    writer.flush().map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<LogConfig, CliError> {
    let merged = LogArgs::merge_from_layers(layers).map_err(CliError::from)?;
    LogConfig::try_from(merged)
}
