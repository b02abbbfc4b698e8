//! In-memory collaborators for unit and behaviour tests.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use geo::{Coord, LineString};

use crate::{
    DailyLog, GeocodeError, Geocoder, PlannedTrip, RouteLeg, RouteProvider, RouteSource,
    RoutingError, ScheduleStore, TripId,
};

/// Geocoder backed by a fixed table of exact place names.
#[derive(Debug, Clone, Default)]
pub struct TableGeocoder {
    entries: BTreeMap<String, Coord<f64>>,
}

impl TableGeocoder {
    /// Build a geocoder from `(name, coordinate)` pairs.
    pub fn with_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Coord<f64>)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, coord)| (name.to_owned(), coord))
                .collect(),
        }
    }
}

impl Geocoder for TableGeocoder {
    fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodeError> {
        if query.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        self.entries
            .get(query)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                query: query.to_owned(),
            })
    }
}

/// Route provider returning the same distance and duration for every leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRouteProvider {
    distance_miles: f64,
    duration: Duration,
}

impl FixedRouteProvider {
    /// Every leg covers `distance_miles` in `drive_hours`.
    #[must_use]
    pub fn new(distance_miles: f64, drive_hours: f64) -> Self {
        Self {
            distance_miles,
            duration: crate::rules::hours(drive_hours).unwrap_or_default(),
        }
    }
}

impl RouteProvider for FixedRouteProvider {
    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, RoutingError> {
        Ok(RouteLeg {
            distance_miles: self.distance_miles,
            duration: self.duration,
            geometry: LineString::from(vec![from, to]),
            source: RouteSource::Provider,
        })
    }
}

/// Route provider that always fails with the configured error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailingRouteProvider {
    error: RoutingError,
}

impl FailingRouteProvider {
    /// Fail every request with `error`.
    #[must_use]
    pub const fn new(error: RoutingError) -> Self {
        Self { error }
    }
}

impl RouteProvider for FailingRouteProvider {
    fn route(&self, _from: Coord<f64>, _to: Coord<f64>) -> Result<RouteLeg, RoutingError> {
        Err(self.error.clone())
    }
}

/// `ScheduleStore` keeping everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryScheduleStore {
    trips: BTreeMap<TripId, PlannedTrip>,
    logs: BTreeMap<TripId, BTreeMap<chrono::NaiveDate, DailyLog>>,
}

impl ScheduleStore for MemoryScheduleStore {
    type Error = Infallible;

    fn save_plan(&mut self, trip: &PlannedTrip, logs: &[DailyLog]) -> Result<(), Self::Error> {
        self.trips.insert(trip.id, trip.clone());
        let stored = self.logs.entry(trip.id).or_default();
        for log in logs {
            stored.insert(log.date, log.clone());
        }
        Ok(())
    }

    fn trip(&self, id: TripId) -> Result<Option<PlannedTrip>, Self::Error> {
        Ok(self.trips.get(&id).cloned())
    }

    fn trips(&self) -> Result<Vec<PlannedTrip>, Self::Error> {
        let mut trips: Vec<_> = self.trips.values().cloned().collect();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    fn daily_logs(&self, id: TripId) -> Result<Vec<DailyLog>, Self::Error> {
        Ok(self
            .logs
            .get(&id)
            .map(|logs| logs.values().cloned().collect())
            .unwrap_or_default())
    }
}

/// A Chicago to Atlanta trip created at noon on 1 May 2024.
#[must_use]
pub fn sample_trip() -> PlannedTrip {
    PlannedTrip {
        id: TripId::random(),
        current_location: "Chicago, IL".to_owned(),
        pickup_location: "St. Louis, MO".to_owned(),
        dropoff_location: "Atlanta, GA".to_owned(),
        current_cycle_used: 0.0,
        created_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .unwrap_or_default(),
        total_distance: 1_200.0,
        estimated_drive_time: 22.0,
    }
}
