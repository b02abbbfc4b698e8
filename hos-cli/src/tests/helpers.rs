//! Stub collaborators and fixtures shared by the CLI tests.

use super::*;
use crate::plan::{PlanBackendBuilder, PlanConfig, run_plan_with};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, TimeZone, Utc};
use geo::Coord;
use hos_core::test_support::{FixedRouteProvider, TableGeocoder};
use hos_core::{Geocoder, RouteProvider, ScheduleStore, TripId};
use hos_data::SqliteScheduleStore;
use tempfile::TempDir;

/// Resolves three known places and answers 600 miles in 10 hours per leg.
pub(super) struct StubBackend {
    geocoder: TableGeocoder,
    router: FixedRouteProvider,
}

impl StubBackend {
    pub(super) fn new() -> Self {
        Self {
            geocoder: TableGeocoder::with_entries([
                ("Chicago, IL", Coord { x: -87.63, y: 41.88 }),
                ("St. Louis, MO", Coord { x: -90.20, y: 38.63 }),
                ("Atlanta, GA", Coord { x: -84.39, y: 33.75 }),
            ]),
            router: FixedRouteProvider::new(600.0, 10.0),
        }
    }
}

impl PlanBackendBuilder for StubBackend {
    fn geocoder(&self, _config: &PlanConfig) -> Result<Box<dyn Geocoder>, CliError> {
        Ok(Box::new(self.geocoder.clone()))
    }

    fn router(&self, _config: &PlanConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        Ok(Box::new(self.router))
    }
}

pub(super) fn database_in(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("trips.db")).expect("utf-8 temp dir")
}

/// 08:00 UTC on 1 May 2024, plus `hours`.
pub(super) fn morning(hours: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8 + hours, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn plan_args(database: &Utf8Path) -> PlanArgs {
    PlanArgs {
        current_location: Some("Chicago, IL".to_owned()),
        pickup_location: Some("St. Louis, MO".to_owned()),
        dropoff_location: Some("Atlanta, GA".to_owned()),
        current_cycle_used: Some(0.0),
        database: Some(database.to_path_buf()),
        ..PlanArgs::default()
    }
}

/// Plans the stub trip at `now` and returns its id.
pub(super) fn plan_stub_trip(database: &Utf8Path, now: DateTime<Utc>) -> TripId {
    let mut output = Vec::new();
    run_plan_with(plan_args(database), &StubBackend::new(), now, &mut output)
        .expect("planning should succeed");
    let store = SqliteScheduleStore::open(database).expect("store should open");
    store
        .trips()
        .expect("trips should load")
        .into_iter()
        .find(|trip| trip.created_at == now)
        .expect("trip should be stored")
        .id
}
