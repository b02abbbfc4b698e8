//! Geocoders resolving place names to coordinates.
//!
//! [`HttpGeocoder`] queries the OpenRouteService search API, restricted to
//! the United States. [`CityTableGeocoder`] answers from a built-in table
//! of US cities and needs no network; chain the two with
//! [`hos_core::FallbackGeocoder`].

mod cities;
mod search;

use geo::Coord;
use hos_core::{GeocodeError, Geocoder, RoutingError};
use log::info;

pub use cities::CityTableGeocoder;

use crate::ors::{OrsClient, OrsConfig, ProviderBuildError};
use search::SearchResponse;

/// Search endpoint, relative to the base URL.
pub const SEARCH_PATH: &str = "geocode/search";

/// Geocoder backed by OpenRouteService.
#[derive(Debug)]
pub struct HttpGeocoder {
    client: OrsClient,
}

impl HttpGeocoder {
    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OrsConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client: OrsClient::new(config)?,
        })
    }

    async fn search_async(&self, query: &str) -> Result<Option<Coord<f64>>, RoutingError> {
        let url = self.client.config().endpoint(SEARCH_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[("text", query), ("size", "1"), ("boundary.country", "US")])
            .send()
            .await
            .map_err(|err| self.client.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.client.convert_reqwest_error(&err, &url))?;

        let search: SearchResponse =
            response
                .json()
                .await
                .map_err(|err| RoutingError::ParseError {
                    message: err.to_string(),
                })?;

        Ok(search
            .features
            .into_iter()
            .next()
            .map(|place| {
                let [x, y] = place.geometry.coordinates;
                Coord { x, y }
            }))
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodeError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        match self.client.block_on(self.search_async(trimmed)) {
            Ok(Some(coord)) => {
                info!("geocoded {trimmed:?} to ({:.4}, {:.4})", coord.y, coord.x);
                Ok(coord)
            }
            Ok(None) => Err(GeocodeError::NotFound {
                query: query.to_owned(),
            }),
            Err(err) => Err(GeocodeError::Service {
                query: query.to_owned(),
                message: err.to_string(),
            }),
        }
    }
}
