//! Driving routes between two coordinates.
//!
//! The scheduler only needs a distance and a duration per leg. A
//! [`RouteProvider`] supplies them from a routing service; when the service
//! is unavailable, [`great_circle_leg`] estimates the leg from the straight
//! line between the endpoints, and [`FallbackRouter`] applies that estimate
//! automatically.

use std::time::Duration;

use geo::{Coord, LineString};
use log::warn;
use thiserror::Error;

use crate::rules::hours;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3_959.0;
/// Road travel is assumed to take this much longer than driving the
/// great-circle distance.
pub const ROAD_DETOUR_FACTOR: f64 = 1.2;
/// Average truck speed assumed by the fallback estimate.
pub const FALLBACK_SPEED_MPH: f64 = 55.0;

/// Where a leg's figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RouteSource {
    /// A routing service.
    Provider,
    /// The straight-line estimate.
    GreatCircle,
}

/// One driven leg between two coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLeg {
    /// Distance in miles.
    pub distance_miles: f64,
    /// Driving time.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_hours"))]
    pub duration: Duration,
    /// Path as `x = longitude`, `y = latitude`.
    pub geometry: LineString<f64>,
    /// Origin of the figures.
    pub source: RouteSource,
}

/// Errors from [`RouteProvider::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The request exceeded its timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The service answered with an error status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// Status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The service could not be reached.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The response body could not be understood.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Error detail.
        message: String,
    },
    /// The service found no route between the endpoints.
    #[error("no route found")]
    NoRoute,
}

/// Fetch a driving route between two coordinates.
///
/// Coordinates use `x = longitude`, `y = latitude`.
pub trait RouteProvider {
    /// Route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns a [`RoutingError`] when the route cannot be obtained.
    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, RoutingError>;
}

impl<P: RouteProvider + ?Sized> RouteProvider for &P {
    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, RoutingError> {
        (**self).route(from, to)
    }
}

/// Haversine distance in miles.
#[must_use]
pub fn great_circle_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let (lat1, lat2) = (from.y.to_radians(), to.y.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (to.x - from.x).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * a.sqrt().asin()
}

/// Estimate a leg from the great-circle distance. The duration pads the
/// straight line by 1.2 and drives it at 55 mph; the geometry is the two
/// endpoints.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hos_core::{RouteSource, great_circle_leg};
///
/// let leg = great_circle_leg(Coord { x: -87.6, y: 41.9 }, Coord { x: -87.6, y: 41.9 });
/// assert_eq!(leg.distance_miles, 0.0);
/// assert_eq!(leg.source, RouteSource::GreatCircle);
/// assert_eq!(leg.geometry.0.len(), 2);
/// ```
#[must_use]
pub fn great_circle_leg(from: Coord<f64>, to: Coord<f64>) -> RouteLeg {
    let distance_miles = great_circle_miles(from, to);
    RouteLeg {
        distance_miles,
        duration: hours(distance_miles * ROAD_DETOUR_FACTOR / FALLBACK_SPEED_MPH)
            .unwrap_or_default(),
        geometry: LineString::from(vec![from, to]),
        source: RouteSource::GreatCircle,
    }
}

/// Wraps a provider and substitutes [`great_circle_leg`] on failure.
#[derive(Debug, Clone, Default)]
pub struct FallbackRouter<P> {
    inner: P,
}

impl<P: RouteProvider> FallbackRouter<P> {
    /// Wrap `inner`.
    #[must_use]
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Route with `inner`, falling back to the straight-line estimate.
    #[must_use]
    pub fn route_or_estimate(&self, from: Coord<f64>, to: Coord<f64>) -> RouteLeg {
        self.inner.route(from, to).unwrap_or_else(|err| {
            warn!("routing failed ({err}); using great-circle estimate");
            great_circle_leg(from, to)
        })
    }
}

impl<P: RouteProvider> RouteProvider for FallbackRouter<P> {
    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, RoutingError> {
        Ok(self.route_or_estimate(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingRouteProvider, FixedRouteProvider};
    use rstest::rstest;

    const NEW_YORK: Coord<f64> = Coord {
        x: -74.0060,
        y: 40.7128,
    };
    const LOS_ANGELES: Coord<f64> = Coord {
        x: -118.2437,
        y: 34.0522,
    };

    #[rstest]
    fn great_circle_matches_known_distance() {
        let miles = great_circle_miles(NEW_YORK, LOS_ANGELES);
        assert!((miles - 2_445.0).abs() < 10.0, "got {miles}");
    }

    #[rstest]
    fn estimate_pads_duration_and_uses_fixed_speed() {
        let leg = great_circle_leg(NEW_YORK, LOS_ANGELES);
        let straight = great_circle_miles(NEW_YORK, LOS_ANGELES);
        assert_eq!(leg.distance_miles, straight);
        let expected_hours = straight * 1.2 / 55.0;
        assert!((crate::rules::as_hours(leg.duration) - expected_hours).abs() < 1e-6);
        assert_eq!(leg.geometry, LineString::from(vec![NEW_YORK, LOS_ANGELES]));
    }

    #[rstest]
    fn fallback_router_passes_provider_legs_through() {
        let router = FallbackRouter::new(FixedRouteProvider::new(500.0, 9.0));
        let leg = router.route_or_estimate(NEW_YORK, LOS_ANGELES);
        assert_eq!(leg.source, RouteSource::Provider);
        assert_eq!(leg.distance_miles, 500.0);
    }

    #[rstest]
    fn fallback_router_recovers_from_failures() {
        let router = FallbackRouter::new(FailingRouteProvider::new(RoutingError::NoRoute));
        let leg = router.route(NEW_YORK, LOS_ANGELES).expect("never fails");
        assert_eq!(leg.source, RouteSource::GreatCircle);
        assert!(leg.distance_miles > 2_400.0);
    }
}
