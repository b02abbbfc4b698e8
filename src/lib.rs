//! Facade crate for the HOS trip planner.
//!
//! This crate re-exports the scheduling domain types and exposes the
//! OpenRouteService collaborators and the SQLite store behind feature flags.
//! Daily log sheet rendering is always available.

#![forbid(unsafe_code)]

pub use hos_core::{
    ComplianceReport, CycleModel, DailyLog, DailyTotals, DutyInterval, DutyStatus,
    FallbackGeocoder, FallbackRouter, GeocodeError, Geocoder, HosRule, HosRules, PlanError,
    PlannedRoute, PlannedTrip, RouteLeg, RouteProvider, RouteSource, RoutingError, Schedule,
    ScheduleError, ScheduleStore, Scheduler, TripId, TripInput, TripPlan, TripPlanner,
    TripRequest, TripSummary, Violation, compute_schedule, validate_compliance,
};
pub use hos_render::{DailyLogSheet, LogGrid, LogSheetConfig, render_daily_log};

#[cfg(feature = "routing-http")]
pub use hos_data::{CityTableGeocoder, HttpGeocoder, HttpRouteProvider, OrsConfig};

#[cfg(feature = "store-sqlite")]
pub use hos_data::{ScheduleStoreError, SqliteScheduleStore};

#[cfg(feature = "test-support")]
pub use hos_core::test_support;
