//! OpenRouteService geocoding search response types.

use serde::Deserialize;

/// GeoJSON feature collection returned by `geocode/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Matches, best first.
    #[serde(default)]
    pub features: Vec<PlaceFeature>,
}

/// A matched place.
#[derive(Debug, Deserialize)]
pub struct PlaceFeature {
    /// Point geometry.
    pub geometry: PlaceGeometry,
}

/// GeoJSON `Point` geometry.
#[derive(Debug, Deserialize)]
pub struct PlaceGeometry {
    /// Position as `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}
