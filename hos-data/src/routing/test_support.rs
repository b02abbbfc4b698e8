//! Test utilities for route providers.
//!
//! [`StubRouteProvider`] is a deterministic test double for
//! [`RouteProvider`] that returns pre-configured responses without making
//! HTTP requests, and counts how often it was asked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use geo::{Coord, LineString};
use hos_core::{RouteLeg, RouteProvider, RouteSource, RoutingError};

/// Stub `RouteProvider` for testing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use hos_core::RouteProvider;
/// use hos_data::routing::test_support::StubRouteProvider;
///
/// let provider = StubRouteProvider::with_leg(300.0, Duration::from_secs(5 * 3600));
/// let leg = provider.route(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
/// assert_eq!(leg.map(|leg| leg.distance_miles), Ok(300.0));
/// assert_eq!(provider.calls(), 1);
/// ```
#[derive(Debug)]
pub struct StubRouteProvider {
    response: StubResponse,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Leg {
        distance_miles: f64,
        duration: Duration,
    },
    Error(RoutingError),
}

impl StubRouteProvider {
    /// Create a provider answering every request with the same leg totals.
    ///
    /// The geometry is the straight line between the requested endpoints.
    #[must_use]
    pub const fn with_leg(distance_miles: f64, duration: Duration) -> Self {
        Self::new(StubResponse::Leg {
            distance_miles,
            duration,
        })
    }

    /// Create a provider that fails every request with `error`.
    #[must_use]
    pub const fn with_error(error: RoutingError) -> Self {
        Self::new(StubResponse::Error(error))
    }

    const fn new(response: StubResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl RouteProvider for StubRouteProvider {
    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, RoutingError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match &self.response {
            StubResponse::Leg {
                distance_miles,
                duration,
            } => Ok(RouteLeg {
                distance_miles: *distance_miles,
                duration: *duration,
                geometry: LineString::from(vec![from, to]),
                source: RouteSource::Provider,
            }),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };
    const DESTINATION: Coord<f64> = Coord { x: 1.0, y: 1.0 };

    #[rstest]
    fn leg_stub_draws_a_straight_line() {
        let provider = StubRouteProvider::with_leg(120.0, Duration::from_secs(7_200));

        let leg = provider.route(ORIGIN, DESTINATION).expect("should succeed");

        assert_eq!(leg.duration, Duration::from_secs(7_200));
        assert_eq!(leg.geometry, LineString::from(vec![ORIGIN, DESTINATION]));
    }

    #[rstest]
    fn error_stub_fails_and_counts() {
        let provider = StubRouteProvider::with_error(RoutingError::NoRoute);

        for _ in 0..3 {
            let err = provider.route(ORIGIN, DESTINATION).expect_err("should fail");
            assert_eq!(err, RoutingError::NoRoute);
        }

        assert_eq!(provider.calls(), 3);
    }
}
