//! Contracts for the external collaborators the pipeline consumes.
//!
//! Implementations live outside this crate (see `ev-sources`); any closure
//! with the right signature also qualifies, which keeps tests short.
//!
//! Implementations must be `Send + Sync` so enrichment can fan out across
//! Rayon workers with the `parallel` feature.

use ev_core::GeoPoint;

use crate::SourceResult;

/// Resolves a district name to its centre coordinate.
pub trait Geocoder: Send + Sync {
    /// `None` means unresolved; the district is left out of the graph.
    fn geocode(&self, name: &str) -> Option<GeoPoint>;
}

/// 24-hour precipitation total at a coordinate, in millimetres.
pub trait PrecipitationSource: Send + Sync {
    fn precipitation_24h(&self, pos: GeoPoint) -> SourceResult<f64>;
}

/// Largest seismic magnitude recorded within `radius_km` of a coordinate.
/// `Ok(0.0)` means no event found.
pub trait SeismicSource: Send + Sync {
    fn max_magnitude_near(&self, pos: GeoPoint, radius_km: f64) -> SourceResult<f64>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Option<GeoPoint> + Send + Sync,
{
    fn geocode(&self, name: &str) -> Option<GeoPoint> {
        self(name)
    }
}

impl<F> PrecipitationSource for F
where
    F: Fn(GeoPoint) -> SourceResult<f64> + Send + Sync,
{
    fn precipitation_24h(&self, pos: GeoPoint) -> SourceResult<f64> {
        self(pos)
    }
}

impl<F> SeismicSource for F
where
    F: Fn(GeoPoint, f64) -> SourceResult<f64> + Send + Sync,
{
    fn max_magnitude_near(&self, pos: GeoPoint, radius_km: f64) -> SourceResult<f64> {
        self(pos, radius_km)
    }
}
