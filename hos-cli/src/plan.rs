//! Plan command implementation for the HOS CLI.

use std::io::{self, Write};

use camino::Utf8PathBuf;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use geo::Coord;
use hos_core::rules::as_hours;
use hos_core::{
    CycleModel, DutyStatus, FallbackGeocoder, Geocoder, HosRules, RouteLeg, RouteProvider,
    RouteSource, RoutingError, ScheduleStore, Scheduler, TripPlan, TripPlanner, TripRequest,
    great_circle_leg,
};
use hos_data::{
    CityTableGeocoder, DEFAULT_BASE_URL, HttpGeocoder, HttpRouteProvider, OrsConfig,
    ProviderBuildError, SqliteScheduleStore,
};
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_FORMAT, ARG_ORS_API_KEY, ARG_ORS_BASE_URL, ARG_PLAN_CURRENT,
    ARG_PLAN_CYCLE_MODEL, ARG_PLAN_CYCLE_USED, ARG_PLAN_DROPOFF, ARG_PLAN_PICKUP,
    ARG_PLAN_ROUTING, ARG_PLAN_START_DATE, CliError, DEFAULT_DATABASE, ENV_PLAN_CURRENT,
    ENV_PLAN_CYCLE_USED, ENV_PLAN_DROPOFF, ENV_PLAN_PICKUP, OutputFormat,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode the current, pickup and drop-off locations, route \
                 both legs through OpenRouteService (falling back to a \
                 great-circle estimate) and schedule the trip under the \
                 property-carrying hours-of-service rules. The trip and its \
                 daily logs are stored in the trip database.",
    about = "Plan a trip and store its daily logs"
)]
#[ortho_config(prefix = "HOS")]
pub(crate) struct PlanArgs {
    /// Where the driver is now, e.g. "Chicago, IL".
    #[arg(long = ARG_PLAN_CURRENT, value_name = "place")]
    #[serde(default)]
    pub(crate) current_location: Option<String>,
    /// Where the load is collected.
    #[arg(long = ARG_PLAN_PICKUP, value_name = "place")]
    #[serde(default)]
    pub(crate) pickup_location: Option<String>,
    /// Where the load is delivered.
    #[arg(long = ARG_PLAN_DROPOFF, value_name = "place")]
    #[serde(default)]
    pub(crate) dropoff_location: Option<String>,
    /// Hours already used in the current 70-hour/8-day cycle.
    #[arg(long = ARG_PLAN_CYCLE_USED, value_name = "hours")]
    #[serde(default)]
    pub(crate) current_cycle_used: Option<f64>,
    /// First day of the trip; defaults to today (UTC).
    #[arg(long = ARG_PLAN_START_DATE, value_name = "YYYY-MM-DD")]
    #[serde(default)]
    pub(crate) start_date: Option<NaiveDate>,
    /// How cycle hours recover on forced rest days.
    #[arg(long = ARG_PLAN_CYCLE_MODEL, value_enum)]
    #[serde(default)]
    pub(crate) cycle_model: Option<CycleModelArg>,
    /// Use OpenRouteService or stay offline with built-in cities.
    #[arg(long = ARG_PLAN_ROUTING, value_enum)]
    #[serde(default)]
    pub(crate) routing: Option<RoutingMode>,
    /// Base URL of the OpenRouteService API.
    #[arg(long = ARG_ORS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_base_url: Option<String>,
    /// OpenRouteService API key.
    #[arg(long = ARG_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
    /// Path to the SQLite trip database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Cycle recovery model selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum CycleModelArg {
    /// Each forced rest day drops 24 hours from the cycle total.
    #[default]
    Flat,
    /// The cycle total is the trailing seven days of duty time.
    Rolling,
}

impl From<CycleModelArg> for CycleModel {
    fn from(value: CycleModelArg) -> Self {
        match value {
            CycleModelArg::Flat => Self::FlatDropOff,
            CycleModelArg::Rolling => Self::RollingWindow,
        }
    }
}

/// Where locations and legs are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum RoutingMode {
    /// OpenRouteService, with the city table and great-circle legs as
    /// fallbacks.
    #[default]
    Ors,
    /// Built-in city table and great-circle legs only.
    Offline,
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct PlanConfig {
    /// Locations and cycle hours to plan for.
    pub(crate) request: TripRequest,
    /// First day of the trip, when not today.
    pub(crate) start_date: Option<NaiveDate>,
    /// Cycle recovery model.
    pub(crate) cycle_model: CycleModel,
    /// Online or offline resolution.
    pub(crate) routing: RoutingMode,
    /// OpenRouteService client settings.
    pub(crate) ors: OrsConfig,
    /// SQLite trip database.
    pub(crate) database: Utf8PathBuf,
    /// Output format.
    pub(crate) format: OutputFormat,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let current_location = args.current_location.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_CURRENT,
            env: ENV_PLAN_CURRENT,
        })?;
        let pickup_location = args.pickup_location.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_PICKUP,
            env: ENV_PLAN_PICKUP,
        })?;
        let dropoff_location = args.dropoff_location.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_DROPOFF,
            env: ENV_PLAN_DROPOFF,
        })?;
        let current_cycle_used = args.current_cycle_used.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_CYCLE_USED,
            env: ENV_PLAN_CYCLE_USED,
        })?;

        let mut ors =
            OrsConfig::new(args.ors_base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()));
        if let Some(key) = args.ors_api_key {
            ors = ors.with_api_key(key);
        }

        Ok(Self {
            request: TripRequest {
                current_location,
                pickup_location,
                dropoff_location,
                current_cycle_used,
            },
            start_date: args.start_date,
            cycle_model: args.cycle_model.unwrap_or_default().into(),
            routing: args.routing.unwrap_or_default(),
            ors,
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Builds the geocoder and route provider for a plan invocation.
pub(crate) trait PlanBackendBuilder {
    fn geocoder(&self, config: &PlanConfig) -> Result<Box<dyn Geocoder>, CliError>;
    fn router(&self, config: &PlanConfig) -> Result<Box<dyn RouteProvider>, CliError>;
}

pub(crate) struct DefaultPlanBackendBuilder;

impl PlanBackendBuilder for DefaultPlanBackendBuilder {
    fn geocoder(&self, config: &PlanConfig) -> Result<Box<dyn Geocoder>, CliError> {
        match config.routing {
            RoutingMode::Offline => Ok(Box::new(CityTableGeocoder)),
            RoutingMode::Ors => {
                let primary = HttpGeocoder::with_config(config.ors.clone())
                    .map_err(|source| build_error(config, source))?;
                Ok(Box::new(FallbackGeocoder::new(primary, CityTableGeocoder)))
            }
        }
    }

    fn router(&self, config: &PlanConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        match config.routing {
            RoutingMode::Offline => Ok(Box::new(GreatCircleRouter)),
            RoutingMode::Ors => {
                if config.ors.api_key.is_none() {
                    warn!("no OpenRouteService API key configured; legs will likely be estimated");
                }
                let provider = HttpRouteProvider::with_config(config.ors.clone())
                    .map_err(|source| build_error(config, source))?;
                Ok(Box::new(provider))
            }
        }
    }
}

fn build_error(config: &PlanConfig, source: ProviderBuildError) -> CliError {
    CliError::BuildProvider {
        base_url: config.ors.base_url.clone(),
        source,
    }
}

/// Route provider answering every leg with the great-circle estimate.
struct GreatCircleRouter;

impl RouteProvider for GreatCircleRouter {
    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, RoutingError> {
        Ok(great_circle_leg(from, to))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlanBackendBuilder, Utc::now(), &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanBackendBuilder,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let plan = execute_plan(&config, builder, now)?;
    save_plan(&config, &plan)?;
    match config.format {
        OutputFormat::Text => write_plan_text(writer, &plan).map_err(CliError::WriteOutput),
        OutputFormat::Json => write_plan_json(writer, &plan),
    }
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanBackendBuilder,
    now: DateTime<Utc>,
) -> Result<TripPlan, CliError> {
    let geocoder = builder.geocoder(config)?;
    let router = builder.router(config)?;
    let scheduler = Scheduler::new(HosRules::default().with_cycle_model(config.cycle_model));
    let planner = TripPlanner::new(&*geocoder, &*router).with_scheduler(scheduler);
    Ok(planner.plan(&config.request, trip_start(now, config.start_date))?)
}

/// Moves `now` onto `start_date`, keeping the time of day.
fn trip_start(now: DateTime<Utc>, start_date: Option<NaiveDate>) -> DateTime<Utc> {
    start_date.map_or(now, |date| date.and_time(now.time()).and_utc())
}

fn save_plan(config: &PlanConfig, plan: &TripPlan) -> Result<(), CliError> {
    let mut store =
        SqliteScheduleStore::open(&config.database).map_err(|source| CliError::OpenStore {
            path: config.database.clone(),
            source,
        })?;
    store
        .save_plan(&plan.trip, &plan.schedule.daily_logs)
        .map_err(|source| CliError::SaveTrip {
            trip_id: plan.trip.id,
            source,
        })?;
    info!("saved trip {} to {}", plan.trip.id, config.database);
    Ok(())
}

fn write_plan_json(writer: &mut dyn Write, plan: &TripPlan) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(plan).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn write_plan_text(writer: &mut dyn Write, plan: &TripPlan) -> io::Result<()> {
    let trip = &plan.trip;
    let summary = &plan.schedule.summary;

    writeln!(writer, "Trip {}", trip.id)?;
    writeln!(writer, "  Current:  {}", trip.current_location)?;
    writeln!(writer, "  Pickup:   {}", trip.pickup_location)?;
    writeln!(writer, "  Drop-off: {}", trip.dropoff_location)?;
    write_leg(writer, "Current to pickup", &plan.route.to_pickup)?;
    write_leg(writer, "Pickup to drop-off", &plan.route.to_dropoff)?;
    writeln!(writer)?;
    writeln!(writer, "Total distance:   {:.1} mi", summary.total_distance)?;
    writeln!(
        writer,
        "Driving time:     {:.1} h",
        as_hours(summary.total_drive_time)
    )?;
    writeln!(
        writer,
        "Total trip time:  {:.1} h",
        as_hours(summary.estimated_total_time)
    )?;
    writeln!(writer, "Days:             {}", summary.number_of_days)?;
    writeln!(writer, "Fuel stops:       {}", summary.fuel_stops_count)?;
    writeln!(writer, "Required breaks:  {}", summary.mandatory_breaks_count)?;

    for warning in &plan.schedule.warnings {
        writeln!(writer, "Warning: {warning}")?;
    }
    if plan.compliance.is_compliant() {
        writeln!(writer, "Compliance: no violations")?;
    } else {
        for message in plan.compliance.messages() {
            writeln!(writer, "Violation: {message}")?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "Day  Date        Driving  On duty   Miles   Cycle")?;
    for log in &plan.schedule.daily_logs {
        writeln!(
            writer,
            "{:>3}  {}  {:>6.1}h  {:>6.1}h  {:>6.1}  {:>5.1}h",
            log.day_number,
            log.date,
            log.totals.hours(DutyStatus::Driving),
            as_hours(log.totals.on_duty()),
            log.totals.total_miles,
            as_hours(log.cycle_hours),
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "Print the daily log sheets with `hos log {}`.", trip.id)
}

fn write_leg(writer: &mut dyn Write, label: &str, leg: &RouteLeg) -> io::Result<()> {
    let source = match leg.source {
        RouteSource::Provider => "routed",
        RouteSource::GreatCircle => "estimated",
    };
    writeln!(
        writer,
        "  {label}: {:.1} mi, {:.1} h ({source})",
        leg.distance_miles,
        as_hours(leg.duration)
    )
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
