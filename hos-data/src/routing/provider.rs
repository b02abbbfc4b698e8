//! HTTP-based `RouteProvider` using the OpenRouteService directions API.
//!
//! The [`RouteProvider`] trait is synchronous to keep the core planner
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! call to the sync interface by blocking on a Tokio runtime internally.

use std::time::Duration;

use geo::{Coord, LineString};
use hos_core::{RouteLeg, RouteProvider, RouteSource, RoutingError};
use log::{debug, info};

use super::directions::{DirectionsRequest, DirectionsResponse};
use crate::ors::{OrsClient, OrsConfig, ProviderBuildError};

/// Directions endpoint for heavy goods vehicles, relative to the base URL.
pub const DIRECTIONS_PATH: &str = "v2/directions/driving-hgv/geojson";

/// Truck routing through OpenRouteService.
///
/// # Runtime behaviour
///
/// Requests block on an owned `current_thread` runtime, or on the caller's
/// runtime through [`tokio::task::block_in_place`] when called from inside a
/// multi-threaded Tokio runtime.
#[derive(Debug)]
pub struct HttpRouteProvider {
    client: OrsClient,
}

impl HttpRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OrsConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OrsConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client: OrsClient::new(config)?,
        })
    }

    fn directions_url(&self) -> String {
        self.client.config().endpoint(DIRECTIONS_PATH)
    }

    async fn fetch_route_async(
        &self,
        from: Coord<f64>,
        to: Coord<f64>,
    ) -> Result<RouteLeg, RoutingError> {
        let url = self.directions_url();
        debug!("requesting route from {url}");

        let response = self
            .client
            .post(&url)
            .json(&DirectionsRequest::between(from, to))
            .send()
            .await
            .map_err(|err| self.client.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.client.convert_reqwest_error(&err, &url))?;

        let directions: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| RoutingError::ParseError {
                    message: err.to_string(),
                })?;

        convert_response(directions)
    }
}

/// Convert the first route of a directions response to a [`RouteLeg`].
fn convert_response(response: DirectionsResponse) -> Result<RouteLeg, RoutingError> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute)?;
    let summary = feature.properties.summary;

    if !(summary.distance.is_finite() && summary.distance >= 0.0) {
        return Err(RoutingError::ParseError {
            message: format!("invalid route distance {}", summary.distance),
        });
    }
    let duration =
        Duration::try_from_secs_f64(summary.duration).map_err(|_| RoutingError::ParseError {
            message: format!("invalid route duration {}", summary.duration),
        })?;

    let geometry: LineString<f64> = feature
        .geometry
        .coordinates
        .into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect();

    info!(
        "route calculated: {:.1} miles, {:.1} hours",
        summary.distance,
        duration.as_secs_f64() / 3_600.0
    );

    Ok(RouteLeg {
        distance_miles: summary.distance,
        duration,
        geometry,
        source: RouteSource::Provider,
    })
}

impl RouteProvider for HttpRouteProvider {
    /// Fetch a truck route between two coordinates.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded (`flavor = "multi_thread"`). From a `current_thread`
    /// runtime the provider falls back to its own runtime, which may block
    /// the caller's runtime.
    fn route(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, RoutingError> {
        self.client.block_on(self.fetch_route_async(from, to))
    }
}
