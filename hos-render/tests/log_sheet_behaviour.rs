//! Behavioural tests for daily log sheet rendering.

use std::cell::RefCell;

use chrono::NaiveDate;
use hos_core::compute_schedule;
use hos_render::{LogSheetConfig, render_daily_log};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Trip figures, sheet details and the rendered text.
#[derive(Debug, Default)]
struct SheetWorld {
    trip: RefCell<Option<(f64, f64, NaiveDate)>>,
    config: RefCell<LogSheetConfig>,
    sheet: RefCell<Option<String>>,
}

impl SheetWorld {
    fn sheet(&self) -> String {
        self.sheet.borrow().clone().expect("a day should be rendered")
    }

    fn row(&self, label: &str) -> String {
        self.sheet()
            .lines()
            .find(|line| line.starts_with(label) && line.contains('|'))
            .map(str::to_owned)
            .unwrap_or_else(|| panic!("no {label} row"))
    }
}

#[fixture]
fn world() -> SheetWorld {
    SheetWorld::default()
}

// --- Given steps ---

#[given("a trip of {miles} miles and {drive} driving hours starting on {start}")]
fn given_trip(world: &SheetWorld, miles: f64, drive: f64, start: NaiveDate) {
    world.trip.replace(Some((miles, drive, start)));
}

#[given("the carrier is \"{carrier}\"")]
fn given_carrier(world: &SheetWorld, carrier: String) {
    let config = world.config.take().with_carrier_name(carrier);
    world.config.replace(config);
}

// --- When steps ---

#[when("day {day} is rendered")]
fn when_rendered(world: &SheetWorld, day: u32) {
    let (miles, drive, start) = world.trip.borrow().expect("trip should be given");
    let schedule = compute_schedule(miles, drive, 0.0, start).expect("trip should schedule");
    let log = schedule
        .daily_logs
        .iter()
        .find(|log| log.day_number == day)
        .expect("log for the requested day");
    let sheet = render_daily_log(log, &world.config.borrow());
    world.sheet.replace(Some(sheet));
}

// --- Then steps ---

#[then("the sheet is dated {date}")]
fn then_dated(world: &SheetWorld, date: String) {
    assert!(world.sheet().contains(&format!("DATE: {date}")));
}

#[then("the {label} row totals {hours} hours")]
fn then_row_total(world: &SheetWorld, label: String, hours: String) {
    let row = world.row(&label);
    assert!(row.trim_end().ends_with(&hours), "{row}");
}

#[then("the remarks start with \"{text}\"")]
fn then_remarks(world: &SheetWorld, text: String) {
    let sheet = world.sheet();
    let remarks = sheet.split("REMARKS\n").nth(1).expect("remarks section");
    assert!(remarks.starts_with(&text), "{remarks}");
}

#[then("the sheet names the carrier \"{carrier}\"")]
fn then_carrier(world: &SheetWorld, carrier: String) {
    assert!(
        world
            .sheet()
            .contains(&format!("NAME OF CARRIER: {carrier}"))
    );
}

#[then("the sheet names the vehicle \"{vehicle}\"")]
fn then_vehicle(world: &SheetWorld, vehicle: String) {
    assert!(
        world
            .sheet()
            .contains(&format!("VEHICLE NUMBERS: {vehicle}"))
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/log_sheet.feature", name = $title)]
        fn $fn_name(world: SheetWorld) {
            let _ = world;
        }
    };
}

register_scenario!(driving_day, "a driving day fills the driving row");
register_scenario!(later_day, "a later day starts off duty at midnight");
register_scenario!(configured_carrier, "the sheet carries the configured carrier");
