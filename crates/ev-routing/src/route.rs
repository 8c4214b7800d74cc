//! Routing result type.

use ev_core::GeoPoint;
use ev_graph::Positions;

/// One evacuation route.  Immutable once returned.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// District names from start to end, no repeats.
    pub path: Vec<String>,
    /// Sum of edge weights along the path, rounded to 2 decimals.
    pub cost: f64,
    /// Districts on the path whose risk score exceeds the risky threshold.
    pub risk_nodes: usize,
}

impl Route {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// `true` if start and end are the same district.
    pub fn is_trivial(&self) -> bool {
        self.path.len() <= 1
    }

    /// Coordinates of each district on the path, for drawing.  Names missing
    /// from `positions` are skipped.
    pub fn polyline(&self, positions: &Positions) -> Vec<GeoPoint> {
        self.path
            .iter()
            .filter_map(|name| positions.get(name).copied())
            .collect()
    }
}

/// Round to 2 decimal places.
#[inline]
pub(crate) fn round_cost(cost: f64) -> f64 {
    (cost * 100.0).round() / 100.0
}
