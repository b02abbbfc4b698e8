//! OpenRouteService directions request and GeoJSON response types.
//!
//! See: <https://openrouteservice.org/dev/#/api-docs/v2/directions>

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Body posted to the directions endpoint.
#[derive(Debug, Serialize)]
pub struct DirectionsRequest {
    /// Waypoints as `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
    /// Distance unit for the summary.
    pub units: &'static str,
    /// Turn-by-turn instructions are not used.
    pub instructions: bool,
}

impl DirectionsRequest {
    /// Request a route between two coordinates, measured in miles.
    pub fn between(from: Coord<f64>, to: Coord<f64>) -> Self {
        Self {
            coordinates: vec![[from.x, from.y], [to.x, to.y]],
            units: "mi",
            instructions: false,
        }
    }
}

/// GeoJSON feature collection returned by the directions endpoint.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// One feature per route; the first is the recommended route.
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

/// A single route.
#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    /// Route properties.
    pub properties: RouteProperties,
    /// Route geometry.
    pub geometry: RouteGeometry,
}

/// Properties of a route feature.
#[derive(Debug, Deserialize)]
pub struct RouteProperties {
    /// Totals for the whole route.
    #[serde(default)]
    pub summary: RouteSummary,
}

/// Route totals. Both fields are absent when start and end coincide.
#[derive(Debug, Default, Deserialize)]
pub struct RouteSummary {
    /// Distance in the requested unit.
    #[serde(default)]
    pub distance: f64,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: f64,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct RouteGeometry {
    /// Path as `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}
