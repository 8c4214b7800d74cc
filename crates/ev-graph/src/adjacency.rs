//! Proximity-based graph construction.

use tracing::{debug, warn};

use ev_core::{DistrictId, GraphConfig};

use crate::graph::{DistrictGraph, DistrictGraphBuilder, Positions};
use crate::source::Geocoder;

/// Build the district adjacency graph.
///
/// Every name the geocoder resolves becomes a district with quiet hazard
/// fields; unresolved names are skipped (visible to callers as a smaller
/// `district_count`).  Every pair of resolved districts within
/// `config.adjacency_threshold_km` is joined by an edge whose weight starts
/// at the great-circle distance.
///
/// Pair evaluation is O(n²).  District counts are in the tens, so no spatial
/// bucketing is done here.
pub fn build_graph<I, S, G>(names: I, geocoder: &G, config: &GraphConfig) -> (DistrictGraph, Positions)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    G: Geocoder + ?Sized,
{
    let mut b = DistrictGraphBuilder::new();
    let mut requested = 0usize;

    for name in names {
        let name = name.as_ref();
        requested += 1;
        match geocoder.geocode(name) {
            Some(pos) => {
                b.add_district(name, pos);
            }
            None => warn!(district = name, "geocoding failed, district excluded"),
        }
    }

    let n = b.district_count();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, c) = (DistrictId(i as u32), DistrictId(j as u32));
            let dist = b.district_pos(a).distance_km(b.district_pos(c));
            if dist <= config.adjacency_threshold_km {
                b.add_edge(a, c, dist);
            }
        }
    }

    let graph = b.build();
    debug!(
        requested,
        districts = graph.district_count(),
        edges = graph.edge_count(),
        "district graph built"
    );

    let positions = graph.positions();
    (graph, positions)
}
