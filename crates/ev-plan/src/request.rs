//! Request and result types.

use ev_core::GeoPoint;
use ev_graph::EnrichReport;
use ev_routing::Route;
use ev_sources::RankedShelter;

/// One routing query.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvacuationRequest {
    pub start: String,
    pub end: String,
    /// Disaster-type labels to penalise.
    pub blocked_types: Vec<String>,
    /// Drop districts over the rainfall block threshold.
    pub remove_blocked: bool,
    /// Routes wanted; the planner's default when `None`.
    pub k: Option<usize>,
}

impl EvacuationRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { start: start.into(), end: end.into(), ..Self::default() }
    }

    pub fn blocked_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn remove_blocked(mut self, remove: bool) -> Self {
        self.remove_blocked = remove;
        self
    }

    pub fn k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }
}

/// Everything a caller needs to present one evacuation plan.
///
/// An empty `routes` list means no route exists (or an endpoint is
/// unknown); it is not an error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EvacuationPlan {
    /// Best first.
    pub routes: Vec<Route>,
    /// Coordinates of the best route, empty if there is none.
    pub polyline: Vec<GeoPoint>,
    /// Shelters nearest the destination.
    pub shelters: Vec<RankedShelter>,
    /// Districts that resolved to a coordinate.  Fewer than requested means
    /// degraded coverage.
    pub district_count: usize,
    pub requested_districts: usize,
    pub enrichment: EnrichReport,
}

impl EvacuationPlan {
    pub fn best(&self) -> Option<&Route> {
        self.routes.first()
    }

    pub fn has_route(&self) -> bool {
        !self.routes.is_empty()
    }

    /// `true` if every configured district was geocoded.
    pub fn full_coverage(&self) -> bool {
        self.district_count == self.requested_districts
    }
}
