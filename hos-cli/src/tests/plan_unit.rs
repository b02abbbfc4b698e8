//! Focused unit tests covering plan configuration and output.

use super::helpers::{StubBackend, database_in, morning, plan_args};
use super::*;
use crate::plan::{
    DefaultPlanBackendBuilder, PlanBackendBuilder, PlanConfig, RoutingMode,
    config_from_layers_for_test, run_plan_with,
};
use camino::Utf8PathBuf;
use hos_core::{CycleModel, PlanError, RouteSource, ScheduleStore, TripPlan};
use hos_data::{DEFAULT_BASE_URL, SqliteScheduleStore};
use rstest::rstest;
use tempfile::TempDir;

fn complete_args() -> PlanArgs {
    PlanArgs {
        current_location: Some("Chicago, IL".to_owned()),
        pickup_location: Some("St. Louis, MO".to_owned()),
        dropoff_location: Some("Atlanta, GA".to_owned()),
        current_cycle_used: Some(12.5),
        ..PlanArgs::default()
    }
}

#[rstest]
#[case::current(ARG_PLAN_CURRENT, ENV_PLAN_CURRENT)]
#[case::pickup(ARG_PLAN_PICKUP, ENV_PLAN_PICKUP)]
#[case::dropoff(ARG_PLAN_DROPOFF, ENV_PLAN_DROPOFF)]
#[case::cycle_used(ARG_PLAN_CYCLE_USED, ENV_PLAN_CYCLE_USED)]
fn converting_without_required_fields_errors(
    #[case] missing: &'static str,
    #[case] env_var: &'static str,
) {
    let mut args = complete_args();
    match missing {
        ARG_PLAN_CURRENT => args.current_location = None,
        ARG_PLAN_PICKUP => args.pickup_location = None,
        ARG_PLAN_DROPOFF => args.dropoff_location = None,
        _ => args.current_cycle_used = None,
    }

    let err = PlanConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, missing);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_fills_defaults() {
    let config = PlanConfig::try_from(complete_args()).expect("config should build");

    assert_eq!(config.request.current_location, "Chicago, IL");
    assert_eq!(config.request.current_cycle_used, 12.5);
    assert_eq!(config.database, Utf8PathBuf::from("trips.db"));
    assert_eq!(config.routing, RoutingMode::Ors);
    assert_eq!(config.ors.base_url, DEFAULT_BASE_URL);
    assert!(config.ors.api_key.is_none());
    assert_eq!(config.cycle_model, CycleModel::FlatDropOff);
    assert_eq!(config.format, OutputFormat::Text);
    assert!(config.start_date.is_none());
}

#[rstest]
fn api_key_is_redacted_from_debug_output() {
    let args = PlanArgs {
        ors_api_key: Some("secret-key".to_owned()),
        ..complete_args()
    };
    let config = PlanConfig::try_from(args).expect("config should build");

    assert_eq!(config.ors.api_key.as_deref(), Some("secret-key"));
    assert!(!format!("{config:?}").contains("secret-key"));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "current_cycle_used": "most of them" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "database": "from-file.db",
            "cycle_model": "rolling",
            "routing": "offline",
            "current_cycle_used": 30.0,
        }),
        None,
    );
    composer.push_environment(json!({
        "current_location": "Chicago, IL",
        "pickup_location": "St. Louis, MO",
        "dropoff_location": "Atlanta, GA",
        "database": "from-env.db",
    }));
    composer.push_cli(json!({
        "format": "json",
        "start_date": "2024-05-06",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.database, Utf8PathBuf::from("from-env.db"));
    assert_eq!(config.cycle_model, CycleModel::RollingWindow);
    assert_eq!(config.routing, RoutingMode::Offline);
    assert_eq!(config.request.current_cycle_used, 30.0);
    assert_eq!(config.request.dropoff_location, "Atlanta, GA");
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.start_date, chrono::NaiveDate::from_ymd_opt(2024, 5, 6));
}

#[rstest]
fn command_line_flags_populate_plan_args() {
    let cli = Cli::try_parse_from([
        "hos",
        "plan",
        "--current",
        "Chicago, IL",
        "--pickup",
        "St. Louis, MO",
        "--dropoff",
        "Atlanta, GA",
        "--cycle-used",
        "12.5",
        "--routing",
        "offline",
        "--cycle-model",
        "rolling",
        "--start-date",
        "2024-05-06",
    ])
    .expect("arguments should parse");

    let Command::Plan(args) = cli.command else {
        panic!("expected plan command");
    };
    assert_eq!(args.pickup_location.as_deref(), Some("St. Louis, MO"));
    assert_eq!(args.current_cycle_used, Some(12.5));
    assert_eq!(args.routing, Some(RoutingMode::Offline));
    assert_eq!(args.start_date, chrono::NaiveDate::from_ymd_opt(2024, 5, 6));
}

#[rstest]
fn unknown_routing_mode_is_rejected() {
    let err = Cli::try_parse_from(["hos", "plan", "--routing", "carrier-pigeon"])
        .expect_err("unknown mode should fail");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[rstest]
fn offline_backend_resolves_cities_and_estimates_legs() {
    let config = PlanConfig {
        routing: RoutingMode::Offline,
        ..PlanConfig::try_from(complete_args()).expect("config should build")
    };
    let builder = DefaultPlanBackendBuilder;

    let geocoder = builder.geocoder(&config).expect("geocoder should build");
    let router = builder.router(&config).expect("router should build");
    let chicago = geocoder.geocode("Chicago, IL").expect("known city");
    let atlanta = geocoder.geocode("atlanta").expect("known city");
    let leg = router.route(chicago, atlanta).expect("estimate never fails");

    assert_eq!(leg.source, RouteSource::GreatCircle);
    assert!((leg.distance_miles - 590.0).abs() < 25.0);
}

#[rstest]
fn text_output_summarises_the_trip_and_saves_it() {
    let dir = TempDir::new().expect("tempdir");
    let database = database_in(&dir);
    let mut output = Vec::new();

    run_plan_with(
        plan_args(&database),
        &StubBackend::new(),
        morning(0),
        &mut output,
    )
    .expect("planning should succeed");

    let text = String::from_utf8(output).expect("utf-8 output");
    assert!(text.contains("Current to pickup: 600.0 mi, 10.0 h (routed)"));
    assert!(text.contains("Total distance:   1200.0 mi"));
    assert!(text.contains("Days:             2"));
    assert!(text.contains("Fuel stops:       1"));
    assert!(text.contains("Compliance: no violations"));
    assert!(text.contains("2024-05-02"));

    let store = SqliteScheduleStore::open(&database).expect("store should open");
    let trips = store.trips().expect("trips should load");
    assert_eq!(trips.len(), 1);
    let logs = store
        .daily_logs(trips.first().expect("one trip").id)
        .expect("logs should load");
    assert_eq!(logs.len(), 2);
}

#[rstest]
fn json_output_is_the_full_plan() {
    let dir = TempDir::new().expect("tempdir");
    let database = database_in(&dir);
    let args = PlanArgs {
        format: Some(OutputFormat::Json),
        ..plan_args(&database)
    };
    let mut output = Vec::new();

    run_plan_with(args, &StubBackend::new(), morning(0), &mut output)
        .expect("planning should succeed");

    let plan: TripPlan = serde_json::from_slice(&output).expect("output should be a trip plan");
    assert_eq!(plan.trip.total_distance, 1_200.0);
    assert_eq!(plan.schedule.daily_logs.len(), 2);
    assert_eq!(plan.trip.created_at, morning(0));
}

#[rstest]
fn start_date_moves_the_first_log() {
    let dir = TempDir::new().expect("tempdir");
    let database = database_in(&dir);
    let start = chrono::NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
    let args = PlanArgs {
        start_date: Some(start),
        format: Some(OutputFormat::Json),
        ..plan_args(&database)
    };
    let mut output = Vec::new();

    run_plan_with(args, &StubBackend::new(), morning(0), &mut output)
        .expect("planning should succeed");

    let plan: TripPlan = serde_json::from_slice(&output).expect("output should be a trip plan");
    let first = plan.schedule.daily_logs.first().expect("a first day");
    assert_eq!(first.date, start);
}

#[rstest]
fn unknown_locations_fail_without_touching_the_database() {
    let dir = TempDir::new().expect("tempdir");
    let database = database_in(&dir);
    let args = PlanArgs {
        dropoff_location: Some("Atlantis".to_owned()),
        ..plan_args(&database)
    };
    let mut output = Vec::new();

    let err = run_plan_with(args, &StubBackend::new(), morning(0), &mut output)
        .expect_err("unknown location should fail");

    match &err {
        CliError::Plan(PlanError::Geocoding { failures }) => assert_eq!(failures.len(), 1),
        other => panic!("expected a geocoding failure, found {other:?}"),
    }
    assert!(err.to_string().contains("dropoff location 'Atlantis'"));
    assert!(output.is_empty());
    assert!(!database.exists());
}

#[rstest]
fn negative_cycle_hours_are_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let database = database_in(&dir);
    let args = PlanArgs {
        current_cycle_used: Some(-1.0),
        ..plan_args(&database)
    };

    let err = run_plan_with(args, &StubBackend::new(), morning(0), &mut Vec::new())
        .expect_err("negative hours should fail");

    assert!(matches!(err, CliError::Plan(PlanError::Schedule(_))));
}
