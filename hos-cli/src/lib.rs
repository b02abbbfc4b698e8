//! Command-line interface for planning HOS-compliant trips.
//!
//! `hos plan` geocodes and routes a trip, schedules it and stores the
//! result; `hos log` prints the stored daily log sheets; `hos trips` lists
//! what has been planned. Every option can come from CLI flags,
//! configuration files or `HOS_CMDS_<COMMAND>_<FIELD>` environment
//! variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

mod error;
mod logs;
mod plan;
mod trips;

pub use error::CliError;

use logs::LogArgs;
use plan::PlanArgs;
use trips::TripsArgs;

const ARG_PLAN_CURRENT: &str = "current";
const ARG_PLAN_PICKUP: &str = "pickup";
const ARG_PLAN_DROPOFF: &str = "dropoff";
const ARG_PLAN_CYCLE_USED: &str = "cycle-used";
const ARG_PLAN_START_DATE: &str = "start-date";
const ARG_PLAN_CYCLE_MODEL: &str = "cycle-model";
const ARG_PLAN_ROUTING: &str = "routing";
const ARG_ORS_BASE_URL: &str = "ors-base-url";
const ARG_ORS_API_KEY: &str = "ors-api-key";
const ARG_DATABASE: &str = "database";
const ARG_FORMAT: &str = "format";
const ARG_LOG_TRIP_ID: &str = "trip-id";
const ARG_LOG_DATE: &str = "date";
const ARG_LOG_CARRIER_NAME: &str = "carrier-name";
const ARG_LOG_MAIN_OFFICE_ADDRESS: &str = "main-office-address";
const ARG_LOG_DRIVER_NAME: &str = "driver-name";
const ARG_LOG_CO_DRIVER_NAME: &str = "co-driver-name";
const ARG_LOG_VEHICLE_NUMBER: &str = "vehicle-number";

const ENV_PLAN_CURRENT: &str = "HOS_CMDS_PLAN_CURRENT_LOCATION";
const ENV_PLAN_PICKUP: &str = "HOS_CMDS_PLAN_PICKUP_LOCATION";
const ENV_PLAN_DROPOFF: &str = "HOS_CMDS_PLAN_DROPOFF_LOCATION";
const ENV_PLAN_CYCLE_USED: &str = "HOS_CMDS_PLAN_CURRENT_CYCLE_USED";
const ENV_LOG_TRIP_ID: &str = "HOS_CMDS_LOG_TRIP_ID";

const DEFAULT_DATABASE: &str = "trips.db";

/// Run the HOS CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, or
/// when the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
        Command::Log(args) => logs::run_log(args),
        Command::Trips(args) => trips::run_trips(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "hos",
    about = "Plan truck trips within the federal hours-of-service limits",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a trip and store its daily logs.
    Plan(PlanArgs),
    /// Print the daily log sheets of a stored trip.
    Log(LogArgs),
    /// List stored trips, newest first.
    Trips(TripsArgs),
}

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[cfg(test)]
mod tests;
