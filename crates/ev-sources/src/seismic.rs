//! Seismic event catalog.

use ev_core::GeoPoint;
use ev_graph::{SeismicSource, SourceResult};

/// One recorded seismic event.
#[derive(Clone, Debug, PartialEq)]
pub struct QuakeEvent {
    pub pos: GeoPoint,
    /// `None` when the feed did not report a magnitude.
    pub magnitude: Option<f64>,
}

/// Snapshot of recent events.  Fetch it once per run and share it; every
/// district query scans the same list.
#[derive(Clone, Debug, Default)]
pub struct QuakeCatalog {
    events: Vec<QuakeEvent>,
}

impl QuakeCatalog {
    pub fn new(events: Vec<QuakeEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[QuakeEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Largest known magnitude within `radius_km` (inclusive) of `pos`, or
    /// `0.0` if there is none.
    pub fn max_magnitude_near(&self, pos: GeoPoint, radius_km: f64) -> f64 {
        self.events
            .iter()
            .filter_map(|e| e.magnitude.map(|m| (e.pos, m)))
            .filter(|&(p, _)| pos.distance_km(p) <= radius_km)
            .fold(0.0, |best, (_, m)| best.max(m))
    }
}

impl SeismicSource for QuakeCatalog {
    fn max_magnitude_near(&self, pos: GeoPoint, radius_km: f64) -> SourceResult<f64> {
        Ok(QuakeCatalog::max_magnitude_near(self, pos, radius_km))
    }
}
