//! I/O collaborators for the HOS trip planner.
//!
//! Responsibilities:
//! - Route legs through OpenRouteService behind the synchronous
//!   [`hos_core::RouteProvider`] trait.
//! - Resolve place names through OpenRouteService or a built-in table of US
//!   cities.
//! - Persist planned trips and their daily logs to SQLite.
//!
//! Boundaries:
//! - Do not encode HOS rules (live in `hos-core`).
//! - Blocking adapters own their runtime; callers stay synchronous.
//!
//! Invariants:
//! - No global mutable state.
//! - Durations are stored as integer nanoseconds, so a saved log loads back
//!   unchanged.

pub mod geocode;
mod ors;
pub mod routing;
pub mod store;

pub use geocode::{CityTableGeocoder, HttpGeocoder};
pub use ors::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, OrsConfig, ProviderBuildError,
};
pub use routing::HttpRouteProvider;
pub use store::{ScheduleStoreError, SqliteScheduleStore};
