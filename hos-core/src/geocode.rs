//! Resolve free-text locations to coordinates.

use geo::Coord;
use log::{info, warn};
use thiserror::Error;

/// Errors from [`Geocoder::geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The query was blank.
    #[error("location is empty")]
    EmptyQuery,
    /// Nothing matched the query.
    #[error("no match for {query:?}")]
    NotFound {
        /// Query as supplied.
        query: String,
    },
    /// The geocoding service failed.
    #[error("geocoding service failed for {query:?}: {message}")]
    Service {
        /// Query as supplied.
        query: String,
        /// Error detail.
        message: String,
    },
}

/// Resolve a place name such as `"Chicago, IL"` to a coordinate with
/// `x = longitude`, `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use hos_core::{GeocodeError, Geocoder};
///
/// struct Origin;
///
/// impl Geocoder for Origin {
///     fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodeError> {
///         if query.trim().is_empty() {
///             return Err(GeocodeError::EmptyQuery);
///         }
///         Ok(Coord { x: 0.0, y: 0.0 })
///     }
/// }
///
/// assert!(Origin.geocode("anywhere").is_ok());
/// assert_eq!(Origin.geocode("  "), Err(GeocodeError::EmptyQuery));
/// ```
pub trait Geocoder {
    /// Look up `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodeError`] when the location cannot be resolved.
    fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).geocode(query)
    }
}

/// Tries `primary`, then `secondary` when the first lookup fails.
#[derive(Debug, Clone, Default)]
pub struct FallbackGeocoder<P, S> {
    primary: P,
    secondary: S,
}

impl<P: Geocoder, S: Geocoder> FallbackGeocoder<P, S> {
    /// Chain two geocoders.
    #[must_use]
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: Geocoder, S: Geocoder> Geocoder for FallbackGeocoder<P, S> {
    fn geocode(&self, query: &str) -> Result<Coord<f64>, GeocodeError> {
        match self.primary.geocode(query) {
            Ok(coord) => Ok(coord),
            Err(GeocodeError::EmptyQuery) => Err(GeocodeError::EmptyQuery),
            Err(err) => {
                warn!("primary geocoder failed ({err}); trying fallback");
                let coord = self.secondary.geocode(query)?;
                info!("resolved {query:?} with fallback geocoder");
                Ok(coord)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TableGeocoder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn chicago() -> TableGeocoder {
        TableGeocoder::with_entries([("Chicago, IL", Coord { x: -87.6, y: 41.9 })])
    }

    #[rstest]
    fn primary_result_wins(chicago: TableGeocoder) {
        let other = TableGeocoder::with_entries([("Chicago, IL", Coord { x: 0.0, y: 0.0 })]);
        let geocoder = FallbackGeocoder::new(chicago, other);
        assert_eq!(
            geocoder.geocode("Chicago, IL"),
            Ok(Coord { x: -87.6, y: 41.9 })
        );
    }

    #[rstest]
    fn secondary_answers_when_primary_misses(chicago: TableGeocoder) {
        let geocoder = FallbackGeocoder::new(TableGeocoder::default(), chicago);
        assert_eq!(
            geocoder.geocode("Chicago, IL"),
            Ok(Coord { x: -87.6, y: 41.9 })
        );
    }

    #[rstest]
    fn both_missing_reports_not_found(chicago: TableGeocoder) {
        let geocoder = FallbackGeocoder::new(TableGeocoder::default(), chicago);
        assert!(matches!(
            geocoder.geocode("Atlantis"),
            Err(GeocodeError::NotFound { .. })
        ));
    }
}
