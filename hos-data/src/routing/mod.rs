//! HTTP route provider backed by OpenRouteService.
//!
//! [`HttpRouteProvider`] implements [`hos_core::RouteProvider`] by posting
//! to the heavy-goods-vehicle directions endpoint and blocking on the
//! response, keeping the core planner synchronous. Wrap it in
//! [`hos_core::FallbackRouter`] to recover from outages with the
//! great-circle estimate.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use hos_core::{FallbackRouter, RouteProvider};
//! use hos_data::{HttpRouteProvider, OrsConfig};
//!
//! let config = OrsConfig::default().with_api_key("my-key");
//! let router = FallbackRouter::new(HttpRouteProvider::with_config(config)?);
//! let leg = router.route_or_estimate(
//!     Coord { x: -87.6298, y: 41.8781 },
//!     Coord { x: -84.3880, y: 33.7490 },
//! );
//! println!("{:.1} miles", leg.distance_miles);
//! # Ok::<(), hos_data::ProviderBuildError>(())
//! ```

mod directions;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{DIRECTIONS_PATH, HttpRouteProvider};
