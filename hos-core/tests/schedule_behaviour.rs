//! Behavioural tests for schedule computation and compliance checks.

use std::cell::RefCell;
use std::time::Duration;

use chrono::NaiveDate;
use hos_core::{Schedule, ScheduleError, compute_schedule, validate_compliance};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Trip figures and the outcome of scheduling them.
#[derive(Debug, Default)]
struct ScheduleWorld {
    trip: RefCell<Option<(f64, f64, f64)>>,
    result: RefCell<Option<Result<Schedule, ScheduleError>>>,
}

impl ScheduleWorld {
    fn schedule(&self) -> Schedule {
        self.result
            .borrow()
            .clone()
            .expect("trip should be scheduled")
            .expect("schedule should succeed")
    }
}

#[fixture]
fn world() -> ScheduleWorld {
    ScheduleWorld::default()
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date")
}

// --- Given steps ---

#[given("a trip of {miles} miles and {drive} driving hours with {cycle} cycle hours used")]
fn given_trip(world: &ScheduleWorld, miles: f64, drive: f64, cycle: f64) {
    world.trip.replace(Some((miles, drive, cycle)));
}

// --- When steps ---

#[when("the trip is scheduled")]
fn when_scheduled(world: &ScheduleWorld) {
    let (miles, drive, cycle) = world.trip.borrow().expect("trip should be given");
    let result = compute_schedule(miles, drive, cycle, start_date());
    world.result.replace(Some(result));
}

// --- Then steps ---

#[then("the schedule spans {days} days")]
fn then_days(world: &ScheduleWorld, days: u32) {
    let schedule = world.schedule();
    assert_eq!(schedule.summary.number_of_days, days);
    assert_eq!(schedule.daily_logs.len(), days as usize);
}

#[then("{count} rest periods are scheduled")]
fn then_rest_periods(world: &ScheduleWorld, count: usize) {
    assert_eq!(world.schedule().rest_periods.len(), count);
}

#[then("{count} fuel stops are scheduled")]
fn then_fuel_stops(world: &ScheduleWorld, count: usize) {
    assert_eq!(world.schedule().fuel_stops.len(), count);
}

#[then("{count} mandatory breaks are scheduled")]
fn then_breaks(world: &ScheduleWorld, count: usize) {
    assert_eq!(world.schedule().mandatory_breaks.len(), count);
}

#[then("no warnings are raised")]
fn then_no_warnings(world: &ScheduleWorld) {
    let schedule = world.schedule();
    assert!(
        schedule.warnings.is_empty(),
        "unexpected warnings: {:?}",
        schedule.warnings
    );
}

#[then("a cycle warning is raised")]
fn then_cycle_warning(world: &ScheduleWorld) {
    let schedule = world.schedule();
    assert!(
        schedule
            .warnings
            .iter()
            .any(|w| w.starts_with("Trip may exceed 70-hour cycle limit")),
        "expected a cycle warning, got {:?}",
        schedule.warnings
    );
}

#[then("no day drives more than 11 hours")]
fn then_daily_cap(world: &ScheduleWorld) {
    let limit = Duration::from_secs(11 * 3_600);
    assert!(
        world
            .schedule()
            .daily_logs
            .iter()
            .all(|log| log.totals.driving <= limit)
    );
}

#[then("the schedule is compliant")]
fn then_compliant(world: &ScheduleWorld) {
    let violations = validate_compliance(&world.schedule());
    assert!(violations.is_empty(), "violations: {violations:?}");
}

#[then("day {day} is spent off duty")]
fn then_off_duty(world: &ScheduleWorld, day: u32) {
    let schedule = world.schedule();
    let log = schedule
        .daily_logs
        .iter()
        .find(|log| log.day_number == day)
        .expect("log for the requested day");
    assert_eq!(log.totals.on_duty(), Duration::ZERO);
    assert!(log.is_contiguous());
}

#[then("the input is rejected")]
fn then_rejected(world: &ScheduleWorld) {
    let borrowed = world.result.borrow();
    assert!(
        matches!(
            borrowed.as_ref(),
            Some(Err(ScheduleError::InvalidInput { .. }))
        ),
        "expected InvalidInput, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/schedule.feature", name = $title)]
        fn $fn_name(world: ScheduleWorld) {
            let _ = world;
        }
    };
}

register_scenario!(empty_trip, "an empty trip fits in one day");
register_scenario!(two_day_trip, "a two-day trip gets fuel, breaks and rest");
register_scenario!(cycle_warning, "a nearly exhausted cycle warns the driver");
register_scenario!(forced_rest, "an exhausted cycle forces a rest day");
register_scenario!(rejected_input, "negative driving time is rejected");
