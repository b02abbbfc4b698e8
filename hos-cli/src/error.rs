//! Error types emitted by the HOS CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use hos_core::{PlanError, TripId};
use hos_data::{ProviderBuildError, ScheduleStoreError};
use thiserror::Error;

/// Errors emitted by the HOS CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without the leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A trip id is not a UUID.
    #[error("invalid trip id {value:?}: {source}")]
    InvalidTripId {
        /// Text that failed to parse.
        value: String,
        /// Parser error.
        #[source]
        source: uuid::Error,
    },
    /// Constructing an OpenRouteService client failed.
    #[error("failed to build OpenRouteService client for {base_url:?}: {source}")]
    BuildProvider {
        /// Service base URL.
        base_url: String,
        /// Underlying build failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The trip could not be planned.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// Opening the trip database failed.
    #[error("failed to open trip database at {path:?}: {source}")]
    OpenStore {
        /// Database path.
        path: Utf8PathBuf,
        /// Underlying store error.
        #[source]
        source: ScheduleStoreError,
    },
    /// Saving a planned trip failed.
    #[error("failed to save trip {trip_id}: {source}")]
    SaveTrip {
        /// Trip being saved.
        trip_id: TripId,
        /// Underlying store error.
        #[source]
        source: ScheduleStoreError,
    },
    /// Reading from the trip database failed.
    #[error("failed to read trip database: {0}")]
    QueryStore(#[source] ScheduleStoreError),
    /// No trip has the requested id.
    #[error("no trip with id {trip_id}")]
    TripNotFound {
        /// Requested trip.
        trip_id: TripId,
    },
    /// The trip has no log for the requested date.
    #[error("trip {trip_id} has no daily log for {date}")]
    LogNotFound {
        /// Requested trip.
        trip_id: TripId,
        /// Requested date.
        date: NaiveDate,
    },
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
