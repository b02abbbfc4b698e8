//! Hours-of-Service trip scheduling.
//!
//! The crate turns a trip's total distance and driving time, plus the hours
//! a driver has already spent in the current 70-hour/8-day cycle, into a
//! day-by-day duty schedule. The pipeline is pure and deterministic:
//!
//! 1. [`fuel_stops`] and [`mandatory_breaks`] derive stops from distance and
//!    driving time.
//! 2. [`simulate_daily_cycle`] partitions driving into duty days under the
//!    11-hour, 14-hour and 70-hour limits.
//! 3. [`Scheduler`] assembles the pieces into a [`Schedule`] of
//!    [`DailyLog`]s.
//! 4. [`validate_compliance`] and [`ComplianceReport`] annotate the result.
//!
//! Geocoding, routing and persistence are reached through the [`Geocoder`],
//! [`RouteProvider`] and [`ScheduleStore`] traits; [`TripPlanner`] wires
//! them together for a complete trip.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod compliance;
pub mod cycle;
pub mod daily_log;
mod error;
pub mod geocode;
pub mod planner;
pub mod route;
pub mod rules;
pub mod schedule;
#[cfg(feature = "serde")]
mod serde_hours;
pub mod stops;
pub mod store;
mod trip;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use compliance::{ComplianceReport, HosRule, Violation, validate_compliance};
pub use cycle::{CycleSimulation, DailyRestPeriod, DutyDay, RestReason, simulate_daily_cycle};
pub use error::ScheduleError;
pub use geocode::{FallbackGeocoder, GeocodeError, Geocoder};
pub use daily_log::{DailyLog, DailyTotals, DutyInterval, DutyStatus, ParseDutyStatusError};
pub use planner::{
    LocationFailure, LocationRole, PlanError, PlannedRoute, TripPlan, TripPlanner, TripRequest,
};
pub use route::{
    FallbackRouter, RouteLeg, RouteProvider, RouteSource, RoutingError, great_circle_leg,
};
pub use rules::{CycleModel, HosRules};
pub use schedule::{Schedule, Scheduler, TripSummary, compute_schedule};
pub use stops::{FuelStop, MandatoryBreak, fuel_stops, mandatory_breaks};
pub use store::ScheduleStore;
pub use trip::{PlannedTrip, TripId, TripInput};
