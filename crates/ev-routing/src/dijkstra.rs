//! Single-pair Dijkstra over a `DistrictGraph` with exclusions.
//!
//! Yen's algorithm calls this once per spur node with part of the graph
//! masked out, so exclusions are passed in rather than copied into a new
//! graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashSet;

use ev_core::{DistrictId, EdgeId};
use ev_graph::DistrictGraph;

/// Districts and edges a search may not use.
pub struct Exclusions {
    /// Indexed by `DistrictId`.
    pub districts: Vec<bool>,
    pub edges: FxHashSet<EdgeId>,
}

impl Exclusions {
    pub fn none(graph: &DistrictGraph) -> Self {
        Self {
            districts: vec![false; graph.district_count()],
            edges: FxHashSet::default(),
        }
    }
}

/// Cheapest path from `from` to `to` by edge weight, avoiding `excluded`.
///
/// Returns the district sequence (both ends included) and its cost, or
/// `None` if `to` is unreachable.  `from == to` yields `[from]` at cost 0.
pub fn shortest_path(
    graph: &DistrictGraph,
    from: DistrictId,
    to: DistrictId,
    excluded: &Exclusions,
) -> Option<(Vec<DistrictId>, f64)> {
    if from == to {
        return Some((vec![from], 0.0));
    }

    let n = graph.district_count();
    // dist[v] = best known cost to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = district that reached v; INVALID for unreached districts.
    let mut prev = vec![DistrictId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap: (cost, district).  Secondary key DistrictId makes tie-breaking
    // deterministic.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, DistrictId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if node == to {
            return Some((reconstruct(&prev, to), cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for &(edge, neighbour) in graph.neighbours(node) {
            if excluded.districts[neighbour.index()] || excluded.edges.contains(&edge) {
                continue;
            }
            let new_cost = cost + graph.edge(edge).weight();
            if new_cost < dist[neighbour.index()] {
                dist[neighbour.index()] = new_cost;
                prev[neighbour.index()] = node;
                heap.push(Reverse((OrderedFloat(new_cost), neighbour)));
            }
        }
    }

    None
}

fn reconstruct(prev: &[DistrictId], to: DistrictId) -> Vec<DistrictId> {
    let mut path = vec![to];
    let mut cur = to;
    while prev[cur.index()] != DistrictId::INVALID {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    path
}
