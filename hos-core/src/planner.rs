//! End-to-end trip planning: geocode, route, schedule, check.
//!
//! [`TripPlanner`] resolves the three trip locations, routes the two legs
//! (current position to pickup, pickup to drop-off), then schedules the
//! combined driving. Routing failures never abort a plan; the great-circle
//! estimate stands in for the failed leg.

use std::fmt;

use chrono::{DateTime, Utc};
use geo::Coord;
use log::info;
use thiserror::Error;

use crate::rules::{as_hours, checked_hours};
use crate::{
    ComplianceReport, FallbackRouter, GeocodeError, Geocoder, PlannedTrip, RouteLeg,
    RouteProvider, Schedule, ScheduleError, Scheduler, TripId, TripInput,
};

/// A driver's request to plan a trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRequest {
    /// Where the driver is now.
    pub current_location: String,
    /// Where the load is collected.
    pub pickup_location: String,
    /// Where the load is delivered.
    pub dropoff_location: String,
    /// Hours already used in the current 8-day cycle.
    pub current_cycle_used: f64,
}

/// Which trip location a geocoding failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationRole {
    /// The driver's current position.
    Current,
    /// The pickup point.
    Pickup,
    /// The drop-off point.
    Dropoff,
}

impl fmt::Display for LocationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Current => "current location",
            Self::Pickup => "pickup location",
            Self::Dropoff => "dropoff location",
        })
    }
}

/// A location that could not be geocoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFailure {
    /// Which location failed.
    pub role: LocationRole,
    /// Text supplied for it.
    pub query: String,
    /// Why the lookup failed.
    pub error: GeocodeError,
}

impl fmt::Display for LocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.role, self.query)
    }
}

fn describe_failures(failures: &[LocationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from [`TripPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// One or more locations could not be resolved.
    #[error(
        "Could not geocode: {}. Please use specific city and state format (e.g., 'Los Angeles, CA')",
        describe_failures(.failures)
    )]
    Geocoding {
        /// Every failed location, in request order.
        failures: Vec<LocationFailure>,
    },
    /// The routed trip could not be scheduled.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Coordinates and legs of a planned trip.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedRoute {
    /// Resolved current position.
    pub current: Coord<f64>,
    /// Resolved pickup point.
    pub pickup: Coord<f64>,
    /// Resolved drop-off point.
    pub dropoff: Coord<f64>,
    /// Current position to pickup.
    pub to_pickup: RouteLeg,
    /// Pickup to drop-off.
    pub to_dropoff: RouteLeg,
}

impl PlannedRoute {
    /// Combined distance of both legs in miles.
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        self.to_pickup.distance_miles + self.to_dropoff.distance_miles
    }

    /// Combined driving time of both legs.
    #[must_use]
    pub fn total_drive_time(&self) -> std::time::Duration {
        self.to_pickup.duration + self.to_dropoff.duration
    }
}

/// Everything produced for one trip; the sole input to persistence and
/// rendering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPlan {
    /// Trip record.
    pub trip: PlannedTrip,
    /// Routed legs.
    pub route: PlannedRoute,
    /// Duty schedule.
    pub schedule: Schedule,
    /// Advisory compliance findings.
    pub compliance: ComplianceReport,
}

/// Plans trips with a geocoder and a route provider.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use geo::{Coord, LineString};
/// use hos_core::{
///     GeocodeError, Geocoder, RouteLeg, RouteProvider, RouteSource, RoutingError, TripPlanner,
///     TripRequest,
/// };
/// use std::time::Duration;
///
/// struct Anywhere;
///
/// impl Geocoder for Anywhere {
///     fn geocode(&self, _query: &str) -> Result<Coord<f64>, GeocodeError> {
///         Ok(Coord { x: -96.8, y: 32.8 })
///     }
/// }
///
/// struct FiveHours;
///
/// impl RouteProvider for FiveHours {
///     fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, RoutingError> {
///         Ok(RouteLeg {
///             distance_miles: 300.0,
///             duration: Duration::from_secs(5 * 3600),
///             geometry: LineString::from(vec![from, to]),
///             source: RouteSource::Provider,
///         })
///     }
/// }
///
/// let request = TripRequest {
///     current_location: "Dallas, TX".into(),
///     pickup_location: "Houston, TX".into(),
///     dropoff_location: "Denver, CO".into(),
///     current_cycle_used: 12.0,
/// };
/// let now = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).single().expect("valid time");
/// let plan = TripPlanner::new(Anywhere, FiveHours).plan(&request, now)?;
/// assert_eq!(plan.trip.total_distance, 600.0);
/// assert!(plan.compliance.is_compliant());
/// # Ok::<(), hos_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TripPlanner<G, R> {
    geocoder: G,
    router: FallbackRouter<R>,
    scheduler: Scheduler,
}

impl<G: Geocoder, R: RouteProvider> TripPlanner<G, R> {
    /// Plan with default rules.
    #[must_use]
    pub fn new(geocoder: G, router: R) -> Self {
        Self {
            geocoder,
            router: FallbackRouter::new(router),
            scheduler: Scheduler::default(),
        }
    }

    /// Replace the scheduler.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Plan `request`, treating `now` as both the creation time and the
    /// start of day 1.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Geocoding`] listing every unresolved location,
    /// or [`PlanError::Schedule`] when the trip cannot be scheduled.
    pub fn plan(&self, request: &TripRequest, now: DateTime<Utc>) -> Result<TripPlan, PlanError> {
        let cycle_used = checked_hours("current_cycle_used", request.current_cycle_used)?;
        let [current, pickup, dropoff] = self.resolve(request)?;

        let to_pickup = self.router.route_or_estimate(current, pickup);
        let to_dropoff = self.router.route_or_estimate(pickup, dropoff);
        let route = PlannedRoute {
            current,
            pickup,
            dropoff,
            to_pickup,
            to_dropoff,
        };
        info!(
            "routed {:.1} mi, {:.1} h driving",
            route.total_distance(),
            as_hours(route.total_drive_time())
        );

        let input =
            TripInput::from_durations(route.total_distance(), route.total_drive_time(), cycle_used)?;
        let schedule = self.scheduler.compute(&input, now.date_naive())?;
        let compliance = ComplianceReport::check(&schedule, self.scheduler.rules());
        let trip = PlannedTrip {
            id: TripId::random(),
            current_location: request.current_location.clone(),
            pickup_location: request.pickup_location.clone(),
            dropoff_location: request.dropoff_location.clone(),
            current_cycle_used: request.current_cycle_used,
            created_at: now,
            total_distance: route.total_distance(),
            estimated_drive_time: as_hours(route.total_drive_time()),
        };
        info!("planned {trip} over {} day(s)", schedule.summary.number_of_days);

        Ok(TripPlan {
            trip,
            route,
            schedule,
            compliance,
        })
    }

    fn resolve(&self, request: &TripRequest) -> Result<[Coord<f64>; 3], PlanError> {
        let lookups = [
            (LocationRole::Current, &request.current_location),
            (LocationRole::Pickup, &request.pickup_location),
            (LocationRole::Dropoff, &request.dropoff_location),
        ];
        let mut failures = Vec::new();
        let mut coords = [Coord { x: 0.0, y: 0.0 }; 3];
        for ((role, query), slot) in lookups.into_iter().zip(coords.iter_mut()) {
            match self.geocoder.geocode(query) {
                Ok(coord) => *slot = coord,
                Err(error) => failures.push(LocationFailure {
                    role,
                    query: query.clone(),
                    error,
                }),
            }
        }
        if failures.is_empty() {
            Ok(coords)
        } else {
            Err(PlanError::Geocoding { failures })
        }
    }
}
